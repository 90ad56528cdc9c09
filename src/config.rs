use std::{str::FromStr, time::Duration};

use tracing::warn;

use crate::cli::Cli;

pub const DEFAULT_MANIFEST: &str = "data/songs.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Path or http(s) URL of the playlist manifest.
    pub manifest: String,
    pub volume: u8,
    /// How far the arrow keys move the progress bar, in percent.
    pub seek_step_percent: u8,
    pub clock_interval: Duration,
    pub render_interval: Duration,
    /// Minimum time the preloader stays on screen.
    pub preloader_delay: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            volume: 100,
            seek_step_percent: 5,
            clock_interval: Duration::from_millis(100),
            render_interval: Duration::from_millis(33),
            preloader_delay: Duration::from_millis(1500),
        }
    }
}

impl PlayerConfig {
    /// Defaults, then `VINYL_*` environment variables, then the parsed command line.
    pub fn load(cli: Cli) -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.apply_cli(cli);
        config
    }

    pub fn apply_cli(&mut self, cli: Cli) {
        if let Some(manifest) = cli.manifest.filter(|m| !m.trim().is_empty()) {
            self.manifest = manifest;
        }
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(volume) = parse::<u8>(&lookup, "VINYL_VOLUME") {
            self.volume = volume.min(100);
        }
        if let Some(step) = parse::<u8>(&lookup, "VINYL_SEEK_STEP") {
            self.seek_step_percent = step.clamp(1, 100);
        }
        if let Some(ms) = parse::<u64>(&lookup, "VINYL_CLOCK_INTERVAL_MS").filter(|ms| *ms > 0) {
            self.clock_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&lookup, "VINYL_RENDER_INTERVAL_MS").filter(|ms| *ms > 0) {
            self.render_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&lookup, "VINYL_PRELOADER_DELAY_MS") {
            self.preloader_delay = Duration::from_millis(ms);
        }
    }

    pub fn volume_ratio(&self) -> f32 {
        f32::from(self.volume.min(100)) / 100.0
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> PlayerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = PlayerConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        config
    }

    #[test]
    fn defaults_match_player_behaviour() {
        let config = PlayerConfig::default();
        assert_eq!(config.manifest, DEFAULT_MANIFEST);
        assert_eq!(config.preloader_delay, Duration::from_millis(1500));
        assert_eq!(config.seek_step_percent, 5);
        assert_eq!(config.volume_ratio(), 1.0);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = overridden(&[
            ("VINYL_VOLUME", "40"),
            ("VINYL_SEEK_STEP", "10"),
            ("VINYL_CLOCK_INTERVAL_MS", "250"),
            ("VINYL_PRELOADER_DELAY_MS", "0"),
        ]);
        assert_eq!(config.volume, 40);
        assert_eq!(config.seek_step_percent, 10);
        assert_eq!(config.clock_interval, Duration::from_millis(250));
        assert_eq!(config.preloader_delay, Duration::ZERO);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config = overridden(&[
            ("VINYL_VOLUME", "loud"),
            ("VINYL_CLOCK_INTERVAL_MS", "0"),
        ]);
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn command_line_manifest_replaces_default() {
        let mut config = PlayerConfig::default();
        config.apply_cli(Cli::try_parse_from(["vinyl", "mixtape.json"]).unwrap());
        assert_eq!(config.manifest, "mixtape.json");

        let mut config = PlayerConfig::default();
        config.apply_cli(Cli {
            manifest: Some("  ".to_string()),
        });
        assert_eq!(config.manifest, DEFAULT_MANIFEST);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = overridden(&[("VINYL_VOLUME", "250"), ("VINYL_SEEK_STEP", "0")]);
        assert_eq!(config.volume, 100);
        assert_eq!(config.seek_step_percent, 1);
    }
}
