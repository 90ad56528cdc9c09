pub mod model;
pub mod source;

pub use model::{LyricCue, Track};
pub use source::{ManifestLocation, ManifestSource, PlaylistError, PlaylistSource};
