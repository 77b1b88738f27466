//! Application configuration.
//!
//! Values are resolved in priority order:
//! 1. Command-line argument
//! 2. Environment variable (both handled by clap, see `main.rs`)
//! 3. TOML config file (`--config`, else `doctodata.toml` in the working directory)
//! 4. Compiled default

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "doctodata.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for the convert endpoints, e.g. `https://api.example.com`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// How long the "Subscribed!" confirmation stays up.
    pub subscribe_reset_ms: u64,
    /// When set, subscriptions are POSTed here as `{"email": ...}`.
    pub subscribe_url: Option<String>,
    /// Save converted files here without asking.
    pub download_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 120,
            subscribe_reset_ms: 3000,
            subscribe_url: None,
            download_dir: None,
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub subscribe_reset_ms: Option<u64>,
    pub subscribe_url: Option<String>,
    pub download_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config_file {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        if let Some(base_url) = &overrides.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = overrides.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(ms) = overrides.subscribe_reset_ms {
            config.subscribe_reset_ms = ms;
        }
        if let Some(url) = &overrides.subscribe_url {
            config.subscribe_url = Some(url.clone());
        }
        if let Some(dir) = &overrides.download_dir {
            config.download_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if let Some(url) = &self.subscribe_url {
            if !is_http_url(url) {
                return Err(ConfigError::Invalid(format!(
                    "subscribe_url must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn subscribe_reset_delay(&self) -> Duration {
        Duration::from_millis(self.subscribe_reset_ms)
    }
}

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn file_values_fill_missing_keys_with_defaults() {
        let file = write_config("base_url = \"https://convert.example.com\"\n");
        let config = AppConfig::resolve(&ConfigOverrides {
            config_file: Some(file.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.base_url, "https://convert.example.com");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.subscribe_reset_ms, 3000);
        assert!(config.subscribe_url.is_none());
    }

    #[test]
    fn overrides_beat_file() {
        let file = write_config(
            "base_url = \"https://file.example.com\"\nrequest_timeout_secs = 30\n",
        );
        let config = AppConfig::resolve(&ConfigOverrides {
            config_file: Some(file.path().to_path_buf()),
            base_url: Some("http://127.0.0.1:8080".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn reset_delay_override_beats_file() {
        let file = write_config("subscribe_reset_ms = 1500\n");
        let config = AppConfig::resolve(&ConfigOverrides {
            config_file: Some(file.path().to_path_buf()),
            subscribe_reset_ms: Some(250),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.subscribe_reset_delay(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = AppConfig::resolve(&ConfigOverrides {
            config_file: Some(write_config("").path().to_path_buf()),
            base_url: Some("ftp://example.com".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = AppConfig::resolve(&ConfigOverrides {
            config_file: Some(write_config("").path().to_path_buf()),
            request_timeout_secs: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("base_url = [not toml");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/doctodata.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
