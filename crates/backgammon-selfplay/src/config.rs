//! Configuration file loading for self-play runs.
//!
//! Settings come from `selfplay.toml` in the current directory when it
//! exists; every field has a default, so an empty or missing file is valid.

use backgammon_engine::DiceRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A setting is outside its allowed range.
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Which built-in advisor plays a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorKind {
    /// Picks uniformly among the legal moves.
    #[default]
    Random,
    /// Prefers hits, safe points and bearing off.
    Race,
}

/// Advisor choice per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub white: AdvisorKind,
    #[serde(default)]
    pub black: AdvisorKind,
}

/// Settings for a self-play run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelfPlayConfig {
    /// Number of games to play. Defaults to 10.
    #[serde(default = "default_games")]
    pub games: u32,
    /// Seed for dice and random advisors. Defaults to 0.
    #[serde(default)]
    pub seed: u64,
    /// Dice usage rule enforced by the engine.
    #[serde(default)]
    pub dice_rule: DiceRule,
    /// Turn limit after which a game is abandoned. Defaults to 2000.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

fn default_games() -> u32 {
    10
}

fn default_max_turns() -> u32 {
    2000
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            seed: 0,
            dice_rule: DiceRule::default(),
            max_turns: default_max_turns(),
            advisor: AdvisorConfig::default(),
        }
    }
}

impl SelfPlayConfig {
    /// Loads the configuration from [`Self::config_path()`], or the defaults
    /// if that file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads and checks the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("selfplay.toml")
    }

    /// Rejects settings that would make a run meaningless.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::InvalidValue {
                field: "games",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_turns",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
games = 250
seed = 7
dice_rule = "maximal"
max_turns = 500

[advisor]
white = "race"
black = "random"
"#;

        let config: SelfPlayConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.games, 250);
        assert_eq!(config.seed, 7);
        assert_eq!(config.dice_rule, DiceRule::Maximal);
        assert_eq!(config.max_turns, 500);
        assert_eq!(config.advisor.white, AdvisorKind::Race);
        assert_eq!(config.advisor.black, AdvisorKind::Random);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: SelfPlayConfig = toml::from_str("").unwrap();
        assert_eq!(config, SelfPlayConfig::default());
        assert_eq!(config.games, 10);
        assert_eq!(config.dice_rule, DiceRule::PerDie);
        assert_eq!(config.advisor.white, AdvisorKind::Random);
    }

    #[test]
    fn test_partial_advisor_table() {
        let toml_content = r#"
[advisor]
black = "race"
"#;
        let config: SelfPlayConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.advisor.white, AdvisorKind::Random);
        assert_eq!(config.advisor.black, AdvisorKind::Race);
    }

    #[test]
    fn test_unknown_advisor_rejected() {
        let toml_content = r#"
[advisor]
white = "gnubg"
"#;
        let result: Result<SelfPlayConfig, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_games_rejected() {
        let config = SelfPlayConfig {
            games: 0,
            ..Default::default()
        };
        match config.check() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "games"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = SelfPlayConfig::load_from(Path::new("does/not/exist/selfplay.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(SelfPlayConfig::config_path(), PathBuf::from("selfplay.toml"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SelfPlayConfig {
            games: 3,
            seed: 99,
            dice_rule: DiceRule::Maximal,
            max_turns: 40,
            advisor: AdvisorConfig {
                white: AdvisorKind::Race,
                black: AdvisorKind::Race,
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: SelfPlayConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
