// src/config.rs

use crate::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_missing_sections() {
        let config: Config = serde_yaml::from_str("features:\n  frame_rate: 30.0\n  turnover_events: true\n  made_shot_events: true\n").unwrap();
        assert_eq!(config.features.frame_rate, 30.0);
        assert!(config.features.made_shot_events);
        // untouched sections fall back to defaults
        assert!(config.screen.enabled);
        assert_eq!(config.screen.min_consecutive_frames, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.features.frame_rate, 25.0);
        assert!(config.features.turnover_events);
        assert!(!config.features.made_shot_events);
        assert_eq!(config.data.input_dir, "data/games");
    }
}
