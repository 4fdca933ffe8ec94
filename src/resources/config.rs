//! Greeting configuration.
//!
//! Every timing, threshold and piece of text the greeting uses lives here so
//! it can be tuned from a JSON file without rebuilding. Missing fields fall
//! back to the defaults below.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::resources::phase::PhaseSchedule;

const CONFIG_DIR_NAME: &str = "dreamshelf";
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors raised while loading or validating a [`GreetingConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Background music settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub enabled: bool,
    /// Asset path relative to the assets folder.
    pub asset_path: String,
    pub artist: String,
    pub title: String,
    pub volume: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            asset_path: "audio/every_breath_you_take.ogg".to_string(),
            artist: "The Police".to_string(),
            title: "Every Breath You Take".to_string(),
            volume: 0.6,
        }
    }
}

/// How long each transient notice stays on screen, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeDurations {
    pub wrong_pick: f32,
    pub music_started: f32,
    pub music_failed: f32,
}

impl Default for NoticeDurations {
    fn default() -> Self {
        Self {
            wrong_pick: 1.2,
            music_started: 3.0,
            music_failed: 4.0,
        }
    }
}

/// Full configuration of the greeting.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Seed for the bookshelf layout and target book.
    pub shelf_seed: u32,
    /// Seed for every decorative particle field.
    pub decor_seed: u64,
    pub book_count: usize,
    pub phases: PhaseSchedule,
    /// Scroll progress each letter paragraph must exceed to appear.
    pub reveal_thresholds: Vec<f32>,
    pub letter_paragraphs: Vec<String>,
    pub letter_signature: String,
    /// Height of the scrollable letter page in viewport heights.
    pub letter_viewports: f32,
    /// Pixels scrolled per wheel line or arrow key press.
    pub scroll_step: f32,
    pub wrong_pick_message: String,
    pub notices: NoticeDurations,
    pub music: MusicConfig,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            shelf_seed: 12345,
            decor_seed: 2024,
            book_count: 18,
            phases: PhaseSchedule::default(),
            reveal_thresholds: vec![0.01, 0.05, 0.1, 0.15, 0.2, 0.28, 0.38],
            letter_paragraphs: [
                "I'M WRITING THIS MYSELF SO THERE'S NO CHATGPT😩",
                "THIS FEELS LIKE I'M WRITING A LETTER TO BE HONEST BUT ANYWAYS.",
                "JUST WANTED TO SAY THAT I'M SO HAPPY THAT YOU TEXTED ME THE FIRST DAY AND I'M HAPPY THAT WE ARE TOGETHER NOW.",
                "WE HAVE DONE A LOT OF STUFF TOGETHER, LITERALLY LIKE WE ARE MARRIED, WE TRAVELED TOGETHER AND ALL OF THESE STUFF WERE NEW FOR ME.",
                "I'M HAPPY THAT I EXPERIENCED ALL OF THESE GOOD THINGS WITH SUCH A BEAUTIFUL, KIND AND SUPPORTIVE GIRL.",
                "LITERALLY ONE OF THE BEST GIRLS I HAVE EVER MET AND I WON'T FORGET ABOUT YOU EVER.",
                "I WISH FOR MORE GOOD TIMES TO EXPERIENCE WITH YOU MY BABY.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            letter_signature: "LOVE YOU ELENISKI 💕".to_string(),
            letter_viewports: 4.0,
            scroll_step: 40.0,
            wrong_pick_message: "Not this one ✋".to_string(),
            notices: NoticeDurations::default(),
            music: MusicConfig::default(),
        }
    }
}

impl GreetingConfig {
    /// Checks the invariants the sequencer and reveal logic rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.book_count == 0 {
            return Err(ConfigError::invalid("book_count must be at least 1"));
        }
        self.phases.validate()?;
        if self.reveal_thresholds.len() != self.letter_paragraphs.len() {
            return Err(ConfigError::invalid(format!(
                "{} reveal thresholds for {} letter paragraphs",
                self.reveal_thresholds.len(),
                self.letter_paragraphs.len()
            )));
        }
        crate::resources::reveal::validate_thresholds(&self.reveal_thresholds)?;
        if self.letter_viewports < 1.0 {
            return Err(ConfigError::invalid("letter_viewports must be at least 1"));
        }
        if self.scroll_step <= 0.0 {
            return Err(ConfigError::invalid("scroll_step must be positive"));
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Loads the config from `explicit` or the platform config directory.
    ///
    /// Any failure is logged and the defaults are used instead; the greeting
    /// should always start.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::default_path() else {
                    warn!("Could not determine config directory, using default config");
                    return Self::default();
                };
                if !path.exists() {
                    info!("No config file at {:?}, using defaults", path);
                    return Self::default();
                }
                path
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    /// Platform-specific config location.
    ///
    /// - Linux: ~/.config/dreamshelf/config.json
    /// - macOS: ~/Library/Application Support/dreamshelf/config.json
    /// - Windows: %APPDATA%/dreamshelf/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(CONFIG_DIR_NAME);
            path.push(CONFIG_FILE_NAME);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GreetingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reveal_thresholds.len(), 7);
        assert_eq!(config.book_count, 18);
        assert_eq!(config.shelf_seed, 12345);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GreetingConfig::from_json(r#"{ "shelf_seed": 7, "music": { "volume": 0.2 } }"#).unwrap();
        assert_eq!(config.shelf_seed, 7);
        assert_eq!(config.music.volume, 0.2);
        assert_eq!(config.music.artist, "The Police");
        assert_eq!(config.phases, PhaseSchedule::default());
    }

    #[test]
    fn test_default_roundtrips_through_json() {
        let config = GreetingConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(GreetingConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let json = r#"{ "reveal_thresholds": [0.01, 0.2, 0.1, 0.15, 0.2, 0.28, 0.38] }"#;
        let err = GreetingConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_threshold_count_mismatch() {
        let json = r#"{ "reveal_thresholds": [0.1, 0.2] }"#;
        assert!(matches!(
            GreetingConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_backward_phase_offsets() {
        let json = r#"{ "phases": { "filling": 5.0, "traveling": 4.0, "arrived": 9.0 } }"#;
        assert!(matches!(
            GreetingConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            GreetingConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GreetingConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = GreetingConfig::load_or_default(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(config, GreetingConfig::default());
    }
}
