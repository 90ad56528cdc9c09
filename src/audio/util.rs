use std::{io::Cursor, path::Path};

use rodio::{Decoder, OutputStream, OutputStreamBuilder};

use crate::audio::error::AudioError;

/// Opens the default output device. The returned stream must outlive every sink.
pub fn open_output() -> Result<OutputStream, AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    stream.log_on_drop(false);
    Ok(stream)
}

pub fn decode(bytes: Vec<u8>, hint: Option<&str>) -> Result<Decoder<Cursor<Vec<u8>>>, AudioError> {
    let byte_len = bytes.len() as u64;
    let mut builder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true)
        .with_gapless(true);
    if let Some(hint) = hint {
        builder = builder.with_hint(hint);
    }

    builder
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))
}

/// File extension of an audio reference, ignoring any query string.
pub fn format_hint(reference: &str) -> Option<String> {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}
