//! config
//!
//! Configuration loading for the `glfork` command.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$GLFORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/glfork/config.toml`
//! 3. `~/.glfork/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitlab_fork::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Host: {}", config.base_url());
//! println!("Polling: {:?}", config.action_config());
//! ```

pub mod schema;

pub use schema::{FileConfig, PollingConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::action::ActionConfig;
use crate::forge::gitlab::DEFAULT_HOST;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GLFORK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let candidates = Self::search_paths(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Candidate config paths in search order.
    pub fn search_paths(
        explicit: Option<PathBuf>,
        xdg_config_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = explicit {
            paths.push(path);
        }
        if let Some(xdg) = xdg_config_home {
            paths.push(xdg.join("glfork/config.toml"));
        }
        if let Some(home) = home {
            paths.push(home.join(".glfork/config.toml"));
        }
        paths
    }

    /// Get the GitLab host.
    ///
    /// Defaults to "https://gitlab.com" if not configured.
    pub fn base_url(&self) -> &str {
        self.file.base_url.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Get the polling settings for the fork action.
    pub fn action_config(&self) -> ActionConfig {
        let mut config = ActionConfig::default();
        if let Some(polling) = &self.file.polling {
            if let Some(ms) = polling.interval_ms {
                config.polling_interval = Duration::from_millis(ms);
            }
            if let Some(attempts) = polling.max_attempts {
                config.max_polling_attempts = attempts;
            }
        }
        config
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
