use serde::Deserialize;

/// A timed lyric line. Cues of a track are sorted ascending by `time_seconds`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LyricCue {
    #[serde(rename = "time")]
    pub time_seconds: f64,
    pub text: String,
}

impl LyricCue {
    pub fn new(time_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            time_seconds,
            text: text.into(),
        }
    }
}

/// One manifest entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    #[serde(rename = "singer", alias = "artist")]
    pub artist: String,
    #[serde(rename = "audio")]
    pub audio_url: String,
    #[serde(rename = "cover", default)]
    pub cover_url: String,
    #[serde(default)]
    pub lyrics: Vec<LyricCue>,
}

impl Track {
    /// Name shown on the record label in place of the cover image.
    pub fn cover_label(&self) -> &str {
        let name = self
            .cover_url
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        let stem = name.split('.').next().unwrap_or_default();
        if stem.is_empty() { &self.title } else { stem }
    }
}

pub fn parse_manifest(bytes: &[u8]) -> Result<Vec<Track>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
