//! Configuration file handling.
//!
//! Settings are read from the first file found among:
//! 1. the path given with `--config`
//! 2. `./.murmur/config.json`
//! 3. `<user config dir>/murmur/config.json`
//!
//! Missing fields fall back to defaults; command-line flags override both.

use murmur_graph::{KeywordMatcher, RankPolicy, DEFAULT_STOPWORDS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory holding per-project settings.
pub const CONFIG_DIR: &str = ".murmur";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keywords: KeywordMatcher,
    pub ranking: RankingConfig,
    pub words: WordsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub policy: RankPolicy,
    /// Share of the views term under the mixed policy.
    pub weight: f64,
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            policy: RankPolicy::Mixed,
            weight: 0.5,
            limit: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub min_len: usize,
    pub stopwords: Vec<String>,
    pub limit: usize,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            min_len: 3,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            limit: 25,
        }
    }
}

impl Config {
    /// Finds the config file to use, if any.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = Path::new(CONFIG_DIR).join(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("murmur").join(CONFIG_FILE))
            .filter(|path| path.exists())
    }

    /// Loads the config, or the defaults when no file is found.
    ///
    /// An explicitly given path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::locate(explicit) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
