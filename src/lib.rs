pub mod audio;
pub mod cli;
pub mod config;
pub mod event;
pub mod http;
pub mod playlist;
pub mod ui;
pub mod util;
