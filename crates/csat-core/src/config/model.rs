//! Configuration data model

use super::logging_config::LoggingConfig;
use crate::error::{SurveyError, SurveyResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Paths of the backend operations, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub login: String,
    pub register: String,
    pub submit_survey: String,
    pub update_survey: String,
    /// The user id is appended as a final path segment
    pub get_responses: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            login: "/api/login".to_string(),
            register: "/api/register".to_string(),
            submit_survey: "/api/submit-survey".to_string(),
            update_survey: "/api/update-survey".to_string(),
            get_responses: "/api/get-responses".to_string(),
        }
    }
}

impl EndpointPaths {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("login", &self.login),
            ("register", &self.register),
            ("submit_survey", &self.submit_survey),
            ("update_survey", &self.update_survey),
            ("get_responses", &self.get_responses),
        ]
    }
}

/// Survey backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub endpoints: EndpointPaths,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            endpoints: EndpointPaths::default(),
        }
    }
}

impl BackendConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed base URL
    pub fn url(&self) -> SurveyResult<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            SurveyError::config_with_context(
                format!("Invalid backend base URL '{}': {}", self.base_url, e),
                "Validating backend.base_url",
            )
        })
    }

    pub fn validate(&self) -> SurveyResult<()> {
        let url = self.url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SurveyError::config(format!(
                "Backend base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(SurveyError::config("Backend timeouts must be greater than 0"));
        }

        for (name, path) in self.endpoints.entries() {
            if !path.starts_with('/') {
                return Err(SurveyError::config_with_context(
                    format!("Endpoint path '{}' must start with '/'", path),
                    format!("Validating backend.endpoints.{}", name),
                ));
            }
        }

        Ok(())
    }
}

/// Top level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsatConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

impl CsatConfig {
    pub fn validate(&self) -> SurveyResult<()> {
        self.backend.validate()?;
        if !LoggingConfig::is_valid_level(&self.logging.level) {
            return Err(SurveyError::config(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CsatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = CsatConfig::default();
        config.backend.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(SurveyError::Config { .. })));

        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = CsatConfig::default();
        config.backend.connect_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let mut config = CsatConfig::default();
        config.backend.endpoints.update_survey = "api/update-survey".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CsatConfig =
            serde_json::from_str(r#"{"backend": {"base_url": "https://survey.example.com"}}"#)
                .unwrap();
        assert_eq!(config.backend.base_url, "https://survey.example.com");
        assert_eq!(config.backend.endpoints, EndpointPaths::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
