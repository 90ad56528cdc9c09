use std::{path::PathBuf, time::Duration};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("vinyl/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Reads manifests and audio files either over http(s) or from the local filesystem.
#[derive(Clone, Debug)]
pub struct ResourceClient {
    client: Client,
}

impl ResourceClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        if is_remote(reference) {
            self.fetch_remote(reference).await
        } else {
            let path = PathBuf::from(reference.strip_prefix("file://").unwrap_or(reference));
            debug!("reading {}", path.display());
            tokio::fs::read(&path)
                .await
                .map_err(|source| FetchError::Io { path, source })
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("fetching {url}");
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}

pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}
