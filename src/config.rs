//! Game settings, read once before a game starts.
//!
//! A [`GameConfig`] says who plays each side, how deep the computer looks
//! and which rule variant is in force. It can be stored as TOML; every field
//! is optional in the file and falls back to its default:
//!
//! ```toml
//! tree_depth = 7
//! player1 = "human"
//! player2 = "computer"
//! variant = "normal"
//! thread_depth = 3
//! cache_capacity = 100003
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::ai::{
    RuleVariant, SearchConfig, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, DEFAULT_THREAD_DEPTH,
};
use crate::game_repr::Side;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Who controls one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerConfig {
    /// Moves typed on the console
    Human,
    /// Moves chosen by the tree search
    Computer,
}

/// Complete settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Plies the computer builds below each of its candidate moves
    pub tree_depth: u32,
    pub player1: PlayerConfig,
    pub player2: PlayerConfig,
    pub variant: RuleVariant,
    /// Remaining depth at or below which the search forks parallel work
    pub thread_depth: u32,
    /// Capacity of each search cache
    pub cache_capacity: usize,
    /// Search threads per computer player (absent = one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Seed for the computer's tie-breaking (absent = random)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tree_depth: DEFAULT_MAX_DEPTH,
            player1: PlayerConfig::Human,
            player2: PlayerConfig::Computer,
            variant: RuleVariant::Normal,
            thread_depth: DEFAULT_THREAD_DEPTH,
            cache_capacity: DEFAULT_CAPACITY,
            threads: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a PvP game configuration.
    pub fn pvp() -> Self {
        Self {
            player1: PlayerConfig::Human,
            player2: PlayerConfig::Human,
            ..Self::default()
        }
    }

    /// Create a human-vs-computer configuration.
    ///
    /// # Arguments
    /// * `human_side` - The side the human plays
    /// * `tree_depth` - Look-ahead of the computer
    pub fn pvc(human_side: Side, tree_depth: u32) -> Self {
        let (player1, player2) = match human_side {
            Side::One => (PlayerConfig::Human, PlayerConfig::Computer),
            Side::Two => (PlayerConfig::Computer, PlayerConfig::Human),
        };
        Self {
            player1,
            player2,
            tree_depth,
            ..Self::default()
        }
    }

    /// Create a configuration in which the computer plays itself.
    pub fn self_play(tree_depth: u32) -> Self {
        Self {
            player1: PlayerConfig::Computer,
            player2: PlayerConfig::Computer,
            tree_depth,
            ..Self::default()
        }
    }

    pub fn player(&self, side: Side) -> PlayerConfig {
        match side {
            Side::One => self.player1,
            Side::Two => self.player2,
        }
    }

    /// Rejects values the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cache_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "threads",
                message: "must be at least 1 when given".to_string(),
            });
        }
        Ok(())
    }

    /// Search settings for a computer player of this game.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.tree_depth,
            thread_depth: self.thread_depth,
            cache_capacity: self.cache_capacity,
            threads: self.threads,
            seed: self.seed,
            variant: self.variant,
            reuse_eval_cache: false,
        }
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Write this configuration to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`GameConfig::load`], but falls back to the defaults when the
    /// file is missing or unusable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default settings: {err}");
                Self::default()
            }
        }
    }
}
