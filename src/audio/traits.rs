use crate::{audio::error::AudioError, playlist::Track};
use std::time::Duration;

/// Surface of the audio engine the player drives.
///
/// `load` replaces whatever was queued and leaves the engine paused at zero;
/// audio may become available later, until then `duration` is `None`.
pub trait PlaybackControl: Send + Sync {
    fn load(&self, track: &Track);
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, position: Duration) -> Result<(), AudioError>;
    fn set_volume(&self, volume: f32);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    /// True once loaded audio has played to its natural end.
    fn is_finished(&self) -> bool;
}
