//! Submission reconciler
//!
//! Translates in-memory answers to the backend wire format and interprets the
//! backend's replies for submit, update and fetch.

use crate::account::UserId;
use crate::answer::{Answer, AnswerSet};
use crate::backend::{ApiReply, SurveyBackend, SurveySubmission};
use crate::error::{SurveyError, SurveyResult};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};

/// HTTP status some backends use for a duplicate submission
const STATUS_CONFLICT: u16 = 409;

/// Coerce every answer value to list form.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(answers: &AnswerSet) -> AnswerSet {
    answers.normalized()
}

/// Sends answer sets to the backend and classifies the outcome
pub struct Reconciler {
    backend: Arc<dyn SurveyBackend>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, however it finishes
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Reconciler {
    pub fn new(backend: Arc<dyn SurveyBackend>) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &dyn SurveyBackend {
        self.backend.as_ref()
    }

    /// Whether a submit or update is currently pending
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin_request(&self) -> SurveyResult<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SurveyError::RequestInFlight)?;
        Ok(InFlightGuard(&self.in_flight))
    }

    fn submission(user: Option<&UserId>, answers: &AnswerSet) -> SurveyResult<SurveySubmission> {
        let user = require_user(user)?;
        Ok(SurveySubmission {
            user_id: user.as_str().to_string(),
            answers: normalize(answers),
        })
    }

    /// Create the user's survey response.
    ///
    /// Returns the backend's success payload uninterpreted. The caller's
    /// answers are only borrowed, so a failed submit leaves them intact for a
    /// retry.
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub async fn submit(&self, user: Option<&UserId>, answers: &AnswerSet) -> SurveyResult<Value> {
        let submission = Self::submission(user, answers)?;
        let _guard = self.begin_request()?;

        let reply = self.backend.submit_survey(&submission).await?;
        if !reply.is_success() {
            return Err(classify_submit_failure(&reply));
        }

        debug!(user_id = %submission.user_id, "survey submitted");
        Ok(reply.body)
    }

    /// Replace the user's stored survey response.
    ///
    /// Returns the answers the backend reports as persisted, or the
    /// normalized answers that were sent when the reply does not echo them.
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub async fn update(&self, user: Option<&UserId>, answers: &AnswerSet) -> SurveyResult<AnswerSet> {
        let submission = Self::submission(user, answers)?;
        let _guard = self.begin_request()?;

        let reply = self.backend.update_survey(&submission).await?;
        if !reply.is_success() {
            warn!(status = reply.status, "survey update rejected");
            return Err(SurveyError::update_failed(reply.error_message()));
        }

        debug!(user_id = %submission.user_id, "survey updated");
        match decode_answers(&reply.body) {
            Ok(Some(persisted)) => Ok(persisted),
            Ok(None) => Ok(submission.answers),
            Err(e) => {
                warn!("update reply carried unreadable answers, using sent answers: {}", e);
                Ok(submission.answers)
            }
        }
    }

    /// Load the user's stored answers, normalized to list form.
    ///
    /// A successful reply without answers yields an empty set.
    #[instrument(skip(self))]
    pub async fn fetch(&self, user: Option<&UserId>) -> SurveyResult<AnswerSet> {
        let user = require_user(user)?;

        let reply = self.backend.get_responses(user.as_str()).await?;
        if !reply.is_success() {
            warn!(status = reply.status, "fetching responses rejected");
            let message = match reply.error_message() {
                m if m.is_empty() => "No responses found".to_string(),
                m => m,
            };
            return Err(SurveyError::fetch_failed(message));
        }

        let answers = decode_answers(&reply.body)
            .map_err(|e| SurveyError::fetch_failed(format!("Malformed responses payload: {}", e)))?
            .unwrap_or_default();
        debug!(count = answers.len(), "responses fetched");
        Ok(answers)
    }
}

fn require_user(user: Option<&UserId>) -> SurveyResult<&UserId> {
    match user {
        Some(user) if !user.as_str().is_empty() => Ok(user),
        _ => Err(SurveyError::AuthRequired),
    }
}

fn classify_submit_failure(reply: &ApiReply) -> SurveyError {
    let message = reply.error_message();
    if reply.status == STATUS_CONFLICT || message.to_lowercase().contains("already submitted") {
        warn!(status = reply.status, "duplicate survey submission");
        return SurveyError::DuplicateSubmission;
    }
    warn!(status = reply.status, "survey submission rejected: {}", message);
    SurveyError::submission_failed(message)
}

/// Decode `body.answers` into a normalized set. `Ok(None)` when absent.
fn decode_answers(body: &Value) -> Result<Option<AnswerSet>, serde_json::Error> {
    match body.get("answers") {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => {
            let answers: Vec<Answer> = serde_json::from_value(raw.clone())?;
            let set: AnswerSet = answers.into_iter().collect();
            Ok(Some(normalize(&set)))
        }
    }
}
