//! Core error types and traits

use thiserror::Error;

/// Result type alias for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Unified error trait implemented by [`SurveyError`].
///
/// - error_code(): Unique code for programmatic error identification
/// - message(): Human-readable error message
/// - is_retryable(): Whether repeating the same request may succeed
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for the survey client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurveyError {
    /// Malformed local input, caught before any network call
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Operation attempted without an authenticated identity
    #[error("Authentication required")]
    AuthRequired,

    /// Backend rejected the credentials
    #[error("Login failed: {message}")]
    AuthFailed { message: String },

    /// Backend rejected the registration
    #[error("Registration failed: {message}")]
    RegistrationFailed { message: String },

    /// Backend reports that a survey was already submitted for this user
    #[error("Survey already submitted")]
    DuplicateSubmission,

    /// Network or protocol level failure talking to the backend
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Generic backend rejection of a first submission
    #[error("Submission failed: {message}")]
    SubmissionFailed { message: String },

    /// Generic backend rejection of an update
    #[error("Update failed: {message}")]
    UpdateFailed { message: String },

    /// Prior responses could not be loaded
    #[error("Fetch failed: {message}")]
    FetchFailed { message: String },

    /// A mutating request is already pending
    #[error("A request is already in flight")]
    RequestInFlight,

    /// Operation not permitted in the current editor state
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },
}
