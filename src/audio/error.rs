use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Failed to fetch audio: {0}")]
    FetchError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Seek error: {0}")]
    SeekError(String),

    #[error("Duration is not known yet")]
    UnknownDuration,

    #[error("No audio is loaded")]
    NotLoaded,
}
