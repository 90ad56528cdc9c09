pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the epoch, for frame-based animations.
pub fn animation_clock() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
