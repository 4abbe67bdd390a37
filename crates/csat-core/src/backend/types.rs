//! Request and reply shapes exchanged with the backend

use crate::answer::AnswerSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Login/registration request body
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Submit/update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub user_id: String,
    pub answers: AnswerSet,
}

/// A decoded backend reply
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// HTTP status code
    pub status: u16,
    /// JSON body, `Null` when the body was empty
    pub body: Value,
}

impl ApiReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// 2xx status and no `"success": false` flag in the body
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
            && self.body.get("success").and_then(Value::as_bool) != Some(false)
    }

    /// Error text reported by the backend (`error`, then `message`), or empty
    pub fn error_message(&self) -> String {
        ["error", "message"]
            .iter()
            .find_map(|key| self.body.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    }
}
