pub mod clock;
pub mod controller;
pub mod error;
pub mod lyrics;
pub mod navigation;
pub mod playback;
pub mod progress;
pub mod traits;
pub mod util;
