//! Error types for the survey client
//!
//! Every fallible operation in this crate returns [`SurveyResult`]. Errors carry
//! a stable code for programmatic handling and a user-facing message that
//! front ends can display verbatim.

mod constructors;
mod conversions;
mod types;
mod unified_error;
mod user_messages;

pub use types::{SurveyError, SurveyResult, UnifiedError};
pub use user_messages::{ErrorCategory, UserFacing};
