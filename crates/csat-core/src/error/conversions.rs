//! From trait implementations for SurveyError conversions

use super::types::SurveyError;

impl From<std::io::Error> for SurveyError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for SurveyError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Transport {
            message: error.to_string(),
            url,
            status_code,
        }
    }
}
