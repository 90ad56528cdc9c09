pub mod controls;
pub mod gauge;
pub mod lyrics;
pub mod preloader;
pub mod progress;
pub mod vinyl;
