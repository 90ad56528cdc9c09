/// Intents raised by the keyboard and mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Quit,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    /// Absolute slider position, 0..=100.
    SeekTo(u8),
    /// Relative move in steps of the configured seek step.
    SeekBy(i8),
}
