use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::{
    http::{FetchError, ResourceClient, is_remote},
    playlist::model::{Track, parse_manifest},
};

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("could not load playlist manifest: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid playlist manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Track>, PlaylistError>;
}

/// Where the manifest lives. Relative audio and cover references are resolved against it.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestLocation {
    Remote(Url),
    Local(PathBuf),
}

impl ManifestLocation {
    pub fn parse(raw: &str) -> Self {
        if is_remote(raw)
            && let Ok(url) = Url::parse(raw)
        {
            return Self::Remote(url);
        }
        Self::Local(PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw)))
    }

    pub fn as_reference(&self) -> String {
        match self {
            Self::Remote(url) => url.to_string(),
            Self::Local(path) => path.to_string_lossy().into_owned(),
        }
    }

    pub fn resolve(&self, reference: &str) -> String {
        if reference.is_empty() || reference.contains("://") {
            return reference.to_string();
        }

        match self {
            Self::Remote(base) => base
                .join(reference)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            Self::Local(manifest) => {
                let path = Path::new(reference);
                if path.is_absolute() {
                    return reference.to_string();
                }
                manifest
                    .parent()
                    .unwrap_or_else(|| Path::new(""))
                    .join(path)
                    .to_string_lossy()
                    .into_owned()
            }
        }
    }
}

/// Reads the JSON manifest once.
pub struct ManifestSource {
    location: ManifestLocation,
    client: ResourceClient,
}

impl ManifestSource {
    pub fn new(location: ManifestLocation, client: ResourceClient) -> Self {
        Self { location, client }
    }
}

#[async_trait]
impl PlaylistSource for ManifestSource {
    async fn fetch(&self) -> Result<Vec<Track>, PlaylistError> {
        let bytes = self.client.fetch(&self.location.as_reference()).await?;
        let mut tracks = parse_manifest(&bytes)?;

        for track in &mut tracks {
            track.audio_url = self.location.resolve(&track.audio_url);
            track.cover_url = self.location.resolve(&track.cover_url);
        }

        info!(
            "loaded {} tracks from {}",
            tracks.len(),
            self.location.as_reference()
        );
        Ok(tracks)
    }
}
