use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use crate::resources::config::GreetingConfig;

/// Command-line arguments parsed at startup.
#[derive(Parser, Resource, Debug, Default, Clone)]
#[command(name = "dreamshelf", about = "An animated bookshelf greeting")]
pub struct CliArgs {
    /// Config file to load instead of the platform default.
    /// Usage: `cargo run -- --config greeting.json`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the bookshelf seed (changes which book is the target).
    #[arg(long)]
    pub seed: Option<u32>,

    /// Skip background music entirely.
    #[arg(long)]
    pub no_music: bool,
}

impl CliArgs {
    /// Loads the config selected by these arguments and applies overrides.
    pub fn resolve_config(&self) -> GreetingConfig {
        let mut config = GreetingConfig::load_or_default(self.config.as_deref());
        self.apply(&mut config);
        config
    }

    /// Applies command-line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut GreetingConfig) {
        if let Some(seed) = self.seed {
            info!("CLI: using shelf seed {}", seed);
            config.shelf_seed = seed;
        }
        if self.no_music {
            info!("CLI: music disabled");
            config.music.enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = CliArgs::try_parse_from(["dreamshelf", "--seed", "7", "--no-music"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(cli.no_music);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_config_path() {
        let cli = CliArgs::try_parse_from(["dreamshelf", "--config", "greeting.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("greeting.json")));
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(CliArgs::try_parse_from(["dreamshelf", "--load", "x"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = CliArgs {
            seed: Some(99),
            no_music: true,
            ..Default::default()
        };
        let mut config = GreetingConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.shelf_seed, 99);
        assert!(!config.music.enabled);
    }
}
