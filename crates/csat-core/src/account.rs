//! Account operations: credential validation, login and registration
//!
//! Credentials are validated locally before any request is made; a
//! validation failure never reaches the backend.

use crate::backend::{Credentials, SurveyBackend};
use crate::error::{SurveyError, SurveyResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const MIN_PASSWORD_LEN: usize = 4;

/// Opaque identifier correlating a person with their stored answers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn validate_email(email: &str) -> SurveyResult<()> {
    if email.is_empty() {
        return Err(SurveyError::validation("email", "Email is required"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(SurveyError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> SurveyResult<()> {
    if password.is_empty() {
        return Err(SurveyError::validation("password", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SurveyError::validation(
            "password",
            "Password must be at least 4 characters long",
        ));
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirm_password: &str) -> SurveyResult<()> {
    if confirm_password.is_empty() {
        return Err(SurveyError::validation(
            "confirm_password",
            "Please confirm your password",
        ));
    }
    if password != confirm_password {
        return Err(SurveyError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }
    Ok(())
}

impl Credentials {
    /// Check email format and password length
    pub fn validate(&self) -> SurveyResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Registration form: credentials plus password confirmation
#[derive(Clone)]
pub struct Registration {
    pub credentials: Credentials,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(credentials: Credentials, confirm_password: impl Into<String>) -> Self {
        Self {
            credentials,
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> SurveyResult<()> {
        self.credentials.validate()?;
        validate_confirmation(&self.credentials.password, &self.confirm_password)
    }
}

/// Log in and return the identity to pass to survey operations
pub async fn login(backend: &dyn SurveyBackend, credentials: &Credentials) -> SurveyResult<UserId> {
    credentials.validate()?;

    let reply = backend.login(credentials).await?;
    if !reply.is_success() {
        tracing::warn!(status = reply.status, "login rejected");
        return Err(SurveyError::auth_failed(reply.error_message()));
    }

    tracing::debug!(email = %credentials.email, "logged in");
    Ok(UserId::new(credentials.email.clone()))
}

/// Create an account. Does not log in.
pub async fn register(backend: &dyn SurveyBackend, registration: &Registration) -> SurveyResult<()> {
    registration.validate()?;

    let reply = backend.register(&registration.credentials).await?;
    if !reply.is_success() {
        tracing::warn!(status = reply.status, "registration rejected");
        return Err(SurveyError::registration_failed(reply.error_message()));
    }

    tracing::debug!(email = %registration.credentials.email, "registered");
    Ok(())
}
