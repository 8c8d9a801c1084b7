//! config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing: `base_url` must be an http(s) URL
//! and `polling.interval_ms` must be positive.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of `config.toml`.
///
/// # Example
///
/// ```toml
/// base_url = "https://gitlab.example.com"
///
/// [polling]
/// interval_ms = 2000
/// max_attempts = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// GitLab host used when none is given on the command line
    pub base_url: Option<String>,

    /// Import polling settings
    pub polling: Option<PollingConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }

        if let Some(polling) = &self.polling {
            polling.validate()?;
        }

        Ok(())
    }
}

/// Import polling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PollingConfig {
    /// Delay between status checks in milliseconds
    pub interval_ms: Option<u64>,

    /// Maximum number of status checks
    pub max_attempts: Option<u32>,
}

impl PollingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == Some(0) {
            return Err(ConfigError::InvalidValue(
                "polling.interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let config: FileConfig = toml::from_str(
            r#"
            base_url = "https://gitlab.example.com"

            [polling]
            interval_ms = 500
            max_attempts = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://gitlab.example.com"));
        assert_eq!(
            config.polling,
            Some(PollingConfig {
                interval_ms: Some(500),
                max_attempts: Some(10),
            })
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_polling_key_rejected() {
        let result: Result<FileConfig, _> = toml::from_str(
            r#"
            [polling]
            interval = 5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_http_base_url_rejected() {
        let config = FileConfig {
            base_url: Some("gitlab.example.com".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn zero_interval_rejected() {
        let config = FileConfig {
            polling: Some(PollingConfig {
                interval_ms: Some(0),
                max_attempts: None,
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_attempts_allowed() {
        let config = FileConfig {
            polling: Some(PollingConfig {
                interval_ms: None,
                max_attempts: Some(0),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
