//! User-facing error messages
//!
//! Maps each [`SurveyError`] to the text a front end shows the person taking
//! the survey, plus an optional hint on what to do next.

use super::types::SurveyError;

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid user input
    UserInput,
    /// Authentication failures
    Authentication,
    /// Backend refused the request
    Rejected,
    /// Network connectivity issues
    Network,
    /// Local configuration issues
    Configuration,
    /// Internal errors
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::UserInput => "Invalid Input",
            Self::Authentication => "Authentication Error",
            Self::Rejected => "Request Rejected",
            Self::Network => "Network Error",
            Self::Configuration => "Configuration Error",
            Self::Internal => "Internal Error",
        }
    }
}

/// User-facing error information
#[derive(Debug, Clone, PartialEq)]
pub struct UserFacing {
    /// The error category
    pub category: ErrorCategory,
    /// Message shown to the user
    pub message: String,
    /// Suggested next step, if any
    pub hint: Option<String>,
}

impl UserFacing {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the error for display
    pub fn format_display(&self) -> String {
        match &self.hint {
            Some(hint) => format!("{}\n  {}", self.message, hint),
            None => self.message.clone(),
        }
    }
}

impl From<&SurveyError> for UserFacing {
    fn from(error: &SurveyError) -> Self {
        match error {
            SurveyError::Validation { message, .. } => {
                Self::new(ErrorCategory::UserInput, message.clone())
            }
            SurveyError::AuthRequired => {
                Self::new(ErrorCategory::Authentication, "Please log in first.")
            }
            SurveyError::AuthFailed { .. } => {
                Self::new(ErrorCategory::Authentication, "Invalid credentials")
            }
            SurveyError::RegistrationFailed { .. } => Self::new(
                ErrorCategory::Rejected,
                "Registration failed. Please try again.",
            )
            .with_hint("The email address may already be registered."),
            SurveyError::DuplicateSubmission => Self::new(
                ErrorCategory::Rejected,
                "You have already submitted a survey. Multiple submissions are not allowed.",
            )
            .with_hint("Use `csat view` to review or edit your answers."),
            SurveyError::SubmissionFailed { .. } => Self::new(
                ErrorCategory::Rejected,
                "An error occurred while submitting the survey. Please try again.",
            ),
            SurveyError::UpdateFailed { .. } => Self::new(
                ErrorCategory::Rejected,
                "Failed to save changes. Please try again.",
            ),
            SurveyError::FetchFailed { .. } => Self::new(
                ErrorCategory::Rejected,
                "Failed to load responses. Please try again later.",
            ),
            SurveyError::Transport { .. } => Self::new(
                ErrorCategory::Network,
                "Could not reach the survey service. Please try again.",
            )
            .with_hint("Check the backend base URL in your configuration."),
            SurveyError::RequestInFlight => Self::new(
                ErrorCategory::Internal,
                "A request is already being processed. Please wait.",
            ),
            SurveyError::InvalidState { message } => {
                Self::new(ErrorCategory::Internal, message.clone())
            }
            SurveyError::Config { message, .. } => {
                Self::new(ErrorCategory::Configuration, message.clone())
            }
            SurveyError::Io { message, .. } | SurveyError::Json { message } => {
                Self::new(ErrorCategory::Internal, message.clone())
            }
        }
    }
}

impl SurveyError {
    /// Get the user-facing view of this error
    pub fn user_facing(&self) -> UserFacing {
        UserFacing::from(self)
    }

    /// Get the message to display to the user
    pub fn user_message(&self) -> String {
        self.user_facing().message
    }
}
