//! Survey backend client
//!
//! [`SurveyBackend`] is the seam between the core and the HTTP API. Every
//! operation returns the raw [`ApiReply`]; interpreting success and error
//! payloads is left to the reconciler and account layers.

mod http;
mod types;

pub use http::HttpBackend;
pub use types::{ApiReply, Credentials, SurveySubmission};

use crate::error::SurveyResult;
use async_trait::async_trait;

/// Operations offered by the survey backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyBackend: Send + Sync {
    /// Check a user's credentials
    async fn login(&self, credentials: &Credentials) -> SurveyResult<ApiReply>;

    /// Create a new account
    async fn register(&self, credentials: &Credentials) -> SurveyResult<ApiReply>;

    /// Create the survey response for a user
    async fn submit_survey(&self, submission: &SurveySubmission) -> SurveyResult<ApiReply>;

    /// Replace a user's stored survey response
    async fn update_survey(&self, submission: &SurveySubmission) -> SurveyResult<ApiReply>;

    /// Fetch a user's stored survey response
    async fn get_responses(&self, user_id: &str) -> SurveyResult<ApiReply>;
}
