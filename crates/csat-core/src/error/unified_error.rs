//! UnifiedError trait implementation for SurveyError

use super::types::{SurveyError, UnifiedError};

impl UnifiedError for SurveyError {
    fn error_code(&self) -> &str {
        match self {
            Self::Validation { .. } => "CSAT_VALIDATION",
            Self::AuthRequired => "CSAT_AUTH_REQUIRED",
            Self::AuthFailed { .. } => "CSAT_AUTH_FAILED",
            Self::RegistrationFailed { .. } => "CSAT_REGISTRATION_FAILED",
            Self::DuplicateSubmission => "CSAT_DUPLICATE_SUBMISSION",
            Self::Transport { .. } => "CSAT_TRANSPORT",
            Self::SubmissionFailed { .. } => "CSAT_SUBMISSION_FAILED",
            Self::UpdateFailed { .. } => "CSAT_UPDATE_FAILED",
            Self::FetchFailed { .. } => "CSAT_FETCH_FAILED",
            Self::RequestInFlight => "CSAT_REQUEST_IN_FLIGHT",
            Self::InvalidState { .. } => "CSAT_INVALID_STATE",
            Self::Config { .. } => "CSAT_CONFIG",
            Self::Io { .. } => "CSAT_IO",
            Self::Json { .. } => "CSAT_JSON",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message,
            Self::AuthRequired => "User not authenticated",
            Self::AuthFailed { message } => message,
            Self::RegistrationFailed { message } => message,
            Self::DuplicateSubmission => "already submitted",
            Self::Transport { message, .. } => message,
            Self::SubmissionFailed { message } => message,
            Self::UpdateFailed { message } => message,
            Self::FetchFailed { message } => message,
            Self::RequestInFlight => "A request is already in flight",
            Self::InvalidState { message } => message,
            Self::Config { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message } => message,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RequestInFlight)
    }
}
