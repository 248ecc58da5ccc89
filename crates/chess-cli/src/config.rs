//! Configuration file loading for the terminal front end.
//!
//! Settings come from a TOML file (`chess.toml` by default). A missing file
//! yields the defaults; command-line flags override whatever was loaded.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chess_ai::AiConfig;
use serde::{Deserialize, Serialize};
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
}

/// Front end configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Difficulty and human color, stored as top-level keys.
    #[serde(flatten)]
    pub ai: AiConfig,
    /// Pause before each AI move, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    pub think_delay_ms: u64,
}

fn default_think_delay_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ai: AiConfig::default(),
            think_delay_ms: default_think_delay_ms(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `chess.toml` in the current
    /// working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}
