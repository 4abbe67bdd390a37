//! Response editor
//!
//! View/edit/cancel cycle over a previously submitted answer set:
//!
//! ```text
//! Loading -> Loaded(view) -> Editing(view, working) -> Loaded(view)     on cancel
//!                                                   -> Loaded(working)  on save
//!         -> Error(message)
//! ```
//!
//! Edits only ever touch the working copy. A failed save stays in `Editing`
//! with the working copy intact.

use crate::account::UserId;
use crate::answer::{AnswerSet, AnswerValue, FieldEdit, apply_edit};
use crate::catalog::{Catalog, Question, QuestionId};
use crate::error::{SurveyError, SurveyResult};
use crate::reconciler::Reconciler;
use std::mem;
use tracing::debug;

const LOAD_FAILED: &str = "Failed to load responses. Please try again later.";
const SAVE_FAILED: &str = "Failed to save changes. Please try again.";

/// Editor lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Loaded {
        view: AnswerSet,
    },
    Editing {
        view: AnswerSet,
        working: AnswerSet,
    },
    Error {
        message: String,
    },
}

impl EditorState {
    fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Editing { .. } => "editing",
            Self::Error { .. } => "error",
        }
    }
}

/// Owns the view/working-copy state of one viewing session
#[derive(Debug, Clone)]
pub struct ResponseEditor {
    state: EditorState,
    last_error: Option<String>,
}

impl Default for ResponseEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Loading,
            last_error: None,
        }
    }

    /// Start an editor directly from an already fetched answer set
    pub fn with_view(view: AnswerSet) -> Self {
        Self {
            state: EditorState::Loaded {
                view: view.normalized(),
            },
            last_error: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// User-facing message of the most recent failed load or save
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// The last loaded or saved answers
    pub fn view(&self) -> Option<&AnswerSet> {
        match &self.state {
            EditorState::Loaded { view } | EditorState::Editing { view, .. } => Some(view),
            _ => None,
        }
    }

    /// The answers being edited, while editing
    pub fn working_copy(&self) -> Option<&AnswerSet> {
        match &self.state {
            EditorState::Editing { working, .. } => Some(working),
            _ => None,
        }
    }

    /// Loaded, and the loaded set holds at least one answer
    pub fn has_submission(&self) -> bool {
        self.view().is_some_and(|v| !v.is_empty())
    }

    /// Fetch the user's stored answers and enter `Loaded`, or `Error` on failure
    pub async fn load(&mut self, reconciler: &Reconciler, user: Option<&UserId>) -> SurveyResult<()> {
        self.state = EditorState::Loading;
        match reconciler.fetch(user).await {
            Ok(view) => {
                debug!(answers = view.len(), "editor loaded");
                self.state = EditorState::Loaded { view };
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                let message = match e {
                    SurveyError::AuthRequired => e.user_message(),
                    _ => LOAD_FAILED.to_string(),
                };
                self.state = EditorState::Error {
                    message: message.clone(),
                };
                self.last_error = Some(message);
                Err(e)
            }
        }
    }

    /// Enter `Editing` with an independent copy of the view
    pub fn begin_edit(&mut self) -> SurveyResult<()> {
        match mem::replace(&mut self.state, EditorState::Loading) {
            EditorState::Loaded { view } => {
                let working = view.clone();
                self.state = EditorState::Editing { view, working };
                debug!("editing started");
                Ok(())
            }
            other => self.restore_and_fail(other, "begin editing"),
        }
    }

    /// Replace the working copy's answer for `question_id`
    pub fn set_field_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<AnswerValue>,
    ) -> SurveyResult<()> {
        let working = self.working_mut("change an answer")?;
        working.upsert(question_id, value.into().normalized());
        Ok(())
    }

    /// Apply one interaction to `question` in the working copy.
    ///
    /// Rating and single-choice questions are replaced by the chosen option,
    /// multiple-choice options are toggled, text is replaced. An invalid edit
    /// leaves the working copy unchanged.
    pub fn apply_edit(&mut self, question: &Question, edit: FieldEdit) -> SurveyResult<()> {
        let working = self.working_mut("change an answer")?;
        let current = working.get(question.id).map(|a| &a.value);
        let updated = apply_edit(question, current, edit)?;
        working.upsert(question.id, updated);
        Ok(())
    }

    /// Discard the working copy and return to the view
    pub fn cancel(&mut self) -> SurveyResult<()> {
        match mem::replace(&mut self.state, EditorState::Loading) {
            EditorState::Editing { view, .. } => {
                self.state = EditorState::Loaded { view };
                debug!("editing cancelled");
                Ok(())
            }
            other => self.restore_and_fail(other, "cancel editing"),
        }
    }

    /// Send the working copy as an update.
    ///
    /// On success the working copy becomes the view. On failure the editor
    /// stays in `Editing` and the error is returned.
    pub async fn save(&mut self, reconciler: &Reconciler, user: Option<&UserId>) -> SurveyResult<()> {
        let working = match &self.state {
            EditorState::Editing { working, .. } => working,
            other => {
                return Err(SurveyError::invalid_state(format!(
                    "Cannot save changes while {}",
                    other.name()
                )));
            }
        };

        match reconciler.update(user, working).await {
            Ok(_) => {
                if let EditorState::Editing { working, .. } =
                    mem::replace(&mut self.state, EditorState::Loading)
                {
                    self.state = EditorState::Loaded {
                        view: working.normalized(),
                    };
                }
                self.last_error = None;
                debug!("changes saved");
                Ok(())
            }
            Err(e) => {
                let message = match e {
                    SurveyError::AuthRequired => e.user_message(),
                    _ => SAVE_FAILED.to_string(),
                };
                self.last_error = Some(message);
                Err(e)
            }
        }
    }

    /// Questions with a displayed answer, in catalog order.
    ///
    /// While editing the working copy is shown, otherwise the view.
    pub fn entries<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c Question, &AnswerValue)> {
        let shown = match &self.state {
            EditorState::Editing { working, .. } => working,
            EditorState::Loaded { view } => view,
            _ => return Vec::new(),
        };
        catalog
            .all()
            .iter()
            .filter_map(|q| shown.get(q.id).map(|a| (q, &a.value)))
            .collect()
    }

    fn working_mut(&mut self, action: &str) -> SurveyResult<&mut AnswerSet> {
        match &mut self.state {
            EditorState::Editing { working, .. } => Ok(working),
            other => Err(SurveyError::invalid_state(format!(
                "Cannot {} while {}",
                action,
                other.name()
            ))),
        }
    }

    fn restore_and_fail(&mut self, previous: EditorState, action: &str) -> SurveyResult<()> {
        let err = SurveyError::invalid_state(format!("Cannot {} while {}", action, previous.name()));
        self.state = previous;
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ApiReply, MockSurveyBackend};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn user() -> UserId {
        UserId::new("user@example.com")
    }

    fn fetching(body: serde_json::Value) -> MockSurveyBackend {
        let mut backend = MockSurveyBackend::new();
        backend
            .expect_get_responses()
            .returning(move |_| Ok(ApiReply::new(200, body.clone())));
        backend
    }

    async fn loaded_editor(backend: MockSurveyBackend) -> (ResponseEditor, Reconciler) {
        let reconciler = Reconciler::new(Arc::new(backend));
        let mut editor = ResponseEditor::new();
        editor.load(&reconciler, Some(&user())).await.unwrap();
        (editor, reconciler)
    }

    #[tokio::test]
    async fn test_toggle_and_save_scenario() {
        let mut backend = fetching(json!({
            "success": true,
            "answers": [{"questionId": 3, "answer": "Reliable"}]
        }));
        backend
            .expect_update_survey()
            .withf(|s| {
                serde_json::to_value(&s.answers).unwrap()
                    == json!([{"questionId": 3, "answer": ["Unique"]}])
            })
            .times(1)
            .returning(|_| Ok(ApiReply::new(200, json!({"success": true}))));

        let (mut editor, reconciler) = loaded_editor(backend).await;
        let question = Catalog::standard().get(3).unwrap();

        editor.begin_edit().unwrap();
        editor.apply_edit(question, FieldEdit::Toggle("Reliable".into())).unwrap();
        editor.apply_edit(question, FieldEdit::Toggle("Unique".into())).unwrap();
        editor.save(&reconciler, Some(&user())).await.unwrap();

        let view = editor.view().unwrap();
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!([{"questionId": 3, "answer": ["Unique"]}])
        );
        assert!(!editor.is_editing());
        assert!(editor.last_error().is_none());
    }

    #[tokio::test]
    async fn test_load_empty_is_not_an_error() {
        let (editor, _) = loaded_editor(fetching(json!({"success": true, "answers": []}))).await;
        assert!(matches!(editor.state(), EditorState::Loaded { .. }));
        assert!(!editor.has_submission());
    }

    #[tokio::test]
    async fn test_load_failure_enters_error_state() {
        let mut backend = MockSurveyBackend::new();
        backend
            .expect_get_responses()
            .returning(|_| Err(SurveyError::transport("connection refused")));
        let reconciler = Reconciler::new(Arc::new(backend));

        let mut editor = ResponseEditor::new();
        assert!(editor.load(&reconciler, Some(&user())).await.is_err());
        assert_eq!(
            editor.state(),
            &EditorState::Error {
                message: LOAD_FAILED.to_string()
            }
        );
        assert!(editor.view().is_none());
    }

    #[tokio::test]
    async fn test_cancel_restores_view() {
        let (mut editor, _) = loaded_editor(fetching(json!({
            "success": true,
            "answers": [
                {"questionId": 1, "answer": "8"},
                {"questionId": 10, "answer": "Fine"}
            ]
        })))
        .await;
        let before = editor.view().unwrap().clone();

        editor.begin_edit().unwrap();
        editor.set_field_answer(1, "2").unwrap();
        editor.set_field_answer(10, "Changed my mind").unwrap();
        editor.set_field_answer(4, "Very well").unwrap();
        assert_eq!(editor.view().unwrap(), &before);

        editor.cancel().unwrap();
        assert_eq!(editor.view().unwrap(), &before);
        assert!(editor.working_copy().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_working_copy() {
        let mut backend = fetching(json!({
            "success": true,
            "answers": [{"questionId": 2, "answer": ["Very satisfied"]}]
        }));
        backend
            .expect_update_survey()
            .times(1)
            .returning(|_| Ok(ApiReply::new(500, json!({"error": "write failed"}))));

        let (mut editor, reconciler) = loaded_editor(backend).await;
        let question = Catalog::standard().get(2).unwrap();
        editor.begin_edit().unwrap();
        editor
            .apply_edit(question, FieldEdit::Choose("Very dissatisfied".into()))
            .unwrap();

        let err = editor.save(&reconciler, Some(&user())).await.unwrap_err();
        assert_eq!(err, SurveyError::update_failed("write failed"));
        assert!(editor.is_editing());
        assert_eq!(
            editor.working_copy().unwrap().get(2).unwrap().value,
            AnswerValue::from(vec!["Very dissatisfied"])
        );
        assert_eq!(
            editor.view().unwrap().get(2).unwrap().value,
            AnswerValue::from(vec!["Very satisfied"])
        );
        assert_eq!(
            editor.last_error(),
            Some("Failed to save changes. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_save_transport_failure_reports_save_message() {
        let mut backend = fetching(json!({
            "success": true,
            "answers": [{"questionId": 10, "answer": "Fine"}]
        }));
        backend
            .expect_update_survey()
            .times(1)
            .returning(|_| Err(SurveyError::transport("connection reset")));

        let (mut editor, reconciler) = loaded_editor(backend).await;
        editor.begin_edit().unwrap();
        editor.set_field_answer(10, "Better now").unwrap();

        let err = editor.save(&reconciler, Some(&user())).await.unwrap_err();
        assert!(matches!(err, SurveyError::Transport { .. }));
        assert!(editor.is_editing());
        assert_eq!(editor.last_error(), Some(SAVE_FAILED));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_contents() {
        let (mut editor, _) = loaded_editor(fetching(json!({
            "success": true,
            "answers": [{"questionId": 3, "answer": ["Reliable", "Useful"]}]
        })))
        .await;
        let question = Catalog::standard().get(3).unwrap();
        let as_set = |editor: &ResponseEditor| -> BTreeSet<String> {
            editor.working_copy().unwrap().get(3).unwrap().value.to_list().into_iter().collect()
        };

        editor.begin_edit().unwrap();
        let original = as_set(&editor);
        for option in ["Reliable", "Unique"] {
            editor.apply_edit(question, FieldEdit::Toggle(option.into())).unwrap();
            editor.apply_edit(question, FieldEdit::Toggle(option.into())).unwrap();
            assert_eq!(as_set(&editor), original);
        }
    }

    #[test]
    fn test_operations_rejected_outside_editing() {
        let mut editor = ResponseEditor::with_view(AnswerSet::new());
        assert!(matches!(
            editor.set_field_answer(1, "5"),
            Err(SurveyError::InvalidState { .. })
        ));
        assert!(matches!(editor.cancel(), Err(SurveyError::InvalidState { .. })));
        assert!(matches!(editor.state(), EditorState::Loaded { .. }));

        editor.begin_edit().unwrap();
        assert!(matches!(editor.begin_edit(), Err(SurveyError::InvalidState { .. })));
        assert!(editor.is_editing());
    }

    #[tokio::test]
    async fn test_save_outside_editing_does_not_call_backend() {
        let mut backend = MockSurveyBackend::new();
        backend.expect_update_survey().never();
        let reconciler = Reconciler::new(Arc::new(backend));

        let mut editor = ResponseEditor::with_view(AnswerSet::new());
        let err = editor.save(&reconciler, Some(&user())).await.unwrap_err();
        assert!(matches!(err, SurveyError::InvalidState { .. }));
    }

    #[test]
    fn test_invalid_edit_leaves_working_copy() {
        let mut view = AnswerSet::new();
        view.upsert(1, "5");
        let mut editor = ResponseEditor::with_view(view);
        editor.begin_edit().unwrap();

        let question = Catalog::standard().get(1).unwrap();
        let err = editor
            .apply_edit(question, FieldEdit::Toggle("5".into()))
            .unwrap_err();
        assert!(matches!(err, SurveyError::Validation { .. }));
        assert_eq!(
            editor.working_copy().unwrap().get(1).unwrap().value,
            AnswerValue::from(vec!["5"])
        );
    }

    #[test]
    fn test_entries_follow_catalog_order() {
        let mut view = AnswerSet::new();
        view.upsert(10, "Thanks");
        view.upsert(1, "9");
        view.upsert(42, "ignored");
        let editor = ResponseEditor::with_view(view);

        let ids: Vec<_> = editor
            .entries(Catalog::standard())
            .iter()
            .map(|(q, _)| q.id)
            .collect();
        assert_eq!(ids, vec![1, 10]);
    }
}
