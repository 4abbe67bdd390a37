//! Configuration loading
//!
//! Sources are applied in the order they were added. A file source replaces
//! the whole configuration (missing fields take their defaults); environment
//! and command-line sources only override the values they set.

use super::logging_config::LogFormat;
use super::model::CsatConfig;
use crate::error::{SurveyError, SurveyResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "csat_config.json";

/// Values that can be overridden outside the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub request_timeout_secs: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: lookup("CSAT_BASE_URL"),
            log_level: lookup("CSAT_LOG_LEVEL"),
            log_format: lookup("CSAT_LOG_FORMAT"),
            request_timeout_secs: lookup("CSAT_REQUEST_TIMEOUT_SECS"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply(&self, config: &mut CsatConfig) -> SurveyResult<()> {
        if let Some(base_url) = &self.base_url {
            config.backend.base_url = base_url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format
                .parse::<LogFormat>()
                .map_err(SurveyError::config)?;
        }
        if let Some(secs) = &self.request_timeout_secs {
            config.backend.request_timeout_secs = secs.parse().map_err(|_| {
                SurveyError::config_with_context(
                    format!("Invalid request timeout '{}'", secs),
                    "Parsing CSAT_REQUEST_TIMEOUT_SECS",
                )
            })?;
        }
        Ok(())
    }
}

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a JSON file
    File(PathBuf),
    /// Configuration from `CSAT_*` environment variables
    Environment,
    /// Explicit overrides, typically from command line flags
    Overrides(ConfigOverrides),
    /// Default configuration
    Default,
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources and validate the result
    pub fn load(self) -> SurveyResult<CsatConfig> {
        let mut config = CsatConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    config = load_file_or_default(path)?;
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config from environment");
                    ConfigOverrides::from_env().apply(&mut config)?;
                }
                ConfigSource::Overrides(overrides) => {
                    tracing::debug!("Applying config overrides");
                    overrides.apply(&mut config)?;
                }
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config = CsatConfig::default();
                }
            }
        }

        config.validate()?;
        tracing::debug!(base_url = %config.backend.base_url, "Configuration loaded");
        Ok(config)
    }
}

fn load_file_or_default(path: &Path) -> SurveyResult<CsatConfig> {
    if !path.exists() {
        return Ok(CsatConfig::default());
    }
    load_config_from_file(path)
}

/// Read and parse a JSON configuration file
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> SurveyResult<CsatConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SurveyError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SurveyError::config_with_context(
            format!("Failed to parse JSON config: {}", e),
            format!("Deserializing JSON configuration from '{}'", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_defaults()
            .with_file(dir.path().join("absent.json"))
            .load()
            .unwrap();
        assert_eq!(config, CsatConfig::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("csat_config.json");
        fs::write(
            &path,
            r#"{"backend": {"base_url": "https://file.example.com", "request_timeout_secs": 5}}"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            base_url: Some("https://flag.example.com".to_string()),
            ..Default::default()
        };

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_overrides(overrides)
            .load()
            .unwrap();

        assert_eq!(config.backend.base_url, "https://flag.example.com");
        assert_eq!(config.backend.request_timeout_secs, 5);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();

        let err = ConfigLoader::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, SurveyError::Config { context: Some(_), .. }));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CSAT_LOG_LEVEL", "debug"),
            ("CSAT_LOG_FORMAT", "json"),
            ("CSAT_REQUEST_TIMEOUT_SECS", "12"),
        ]
        .into_iter()
        .collect();
        let overrides = ConfigOverrides::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(!overrides.is_empty());

        let config = ConfigLoader::new().with_overrides(overrides).load().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.backend.request_timeout_secs, 12);
    }

    #[test]
    fn test_invalid_timeout_override() {
        let overrides = ConfigOverrides {
            request_timeout_secs: Some("soon".to_string()),
            ..Default::default()
        };
        let err = ConfigLoader::new().with_overrides(overrides).load().unwrap_err();
        assert!(err.to_string().contains("Invalid request timeout"));
    }

    #[test]
    fn test_invalid_override_url_fails_validation() {
        let overrides = ConfigOverrides {
            base_url: Some("::::".to_string()),
            ..Default::default()
        };
        assert!(ConfigLoader::new().with_overrides(overrides).load().is_err());
    }
}
