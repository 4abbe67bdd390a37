//! csat core library
//!
//! Survey answer state and backend reconciliation for the customer
//! satisfaction survey client:
//!
//! - [`catalog`]: the fixed questionnaire
//! - [`store`]: answers being composed for a first submission
//! - [`reconciler`]: wire normalization and submit/update/fetch outcomes
//! - [`editor`]: view/edit/cancel/save over a prior submission
//! - [`account`]: credential validation, login and registration
//! - [`backend`]: the HTTP API client
//!
//! Every backend-facing operation takes the user identity explicitly; there
//! is no ambient "current user".

pub mod account;
pub mod answer;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod reconciler;
pub mod store;

// Re-export commonly used types
pub use account::{Registration, UserId};
pub use answer::{Answer, AnswerSet, AnswerValue, FieldEdit};
pub use backend::{ApiReply, Credentials, HttpBackend, SurveyBackend, SurveySubmission};
pub use catalog::{Catalog, Question, QuestionId, QuestionType};
pub use config::{ConfigLoader, CsatConfig};
pub use editor::{EditorState, ResponseEditor};
pub use error::{SurveyError, SurveyResult, UnifiedError};
pub use reconciler::{Reconciler, normalize};
pub use store::AnswerStore;
