//! Answers and answer sets
//!
//! An [`AnswerSet`] holds at most one [`Answer`] per question id. Values are
//! either a single string or a list of strings; [`AnswerValue::normalized`]
//! coerces them to the list form the backend expects.

use crate::catalog::{Question, QuestionId, QuestionType};
use crate::error::{SurveyError, SurveyResult};
use serde::{Deserialize, Deserializer, Serialize};

/// The value recorded for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Coerce to list form: a single string becomes a one-element list,
    /// a list passes through unchanged.
    pub fn normalized(&self) -> AnswerValue {
        AnswerValue::List(self.to_list())
    }

    /// The value as an owned list of strings
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::List(values) => values.clone(),
        }
    }

    /// View the value as a slice, treating a single string as one element
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.as_slice().iter().any(|v| v == option)
    }

    /// Comma separated rendering used when displaying a stored answer
    pub fn display(&self) -> String {
        self.as_slice().join(", ")
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// One question's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(rename = "answer")]
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: QuestionId, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// Answers keyed by question id, one per id, insertion order kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for `question_id`.
    ///
    /// A new id is appended; an existing id keeps its position and has its
    /// value replaced.
    pub fn upsert(&mut self, question_id: QuestionId, value: impl Into<AnswerValue>) {
        let value = value.into();
        match self.position(question_id) {
            Some(idx) => self.answers[idx].value = value,
            None => self.answers.push(Answer { question_id, value }),
        }
    }

    pub fn get(&self, question_id: QuestionId) -> Option<&Answer> {
        self.position(question_id).map(|idx| &self.answers[idx])
    }

    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.position(question_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Copy of this set with every value in list form
    pub fn normalized(&self) -> AnswerSet {
        self.answers
            .iter()
            .map(|a| Answer {
                question_id: a.question_id,
                value: a.value.normalized(),
            })
            .collect()
    }

    fn position(&self, question_id: QuestionId) -> Option<usize> {
        self.answers
            .iter()
            .position(|a| a.question_id == question_id)
    }
}

impl FromIterator<Answer> for AnswerSet {
    /// Collect answers, later entries for the same id replacing earlier ones
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for answer in iter {
            set.upsert(answer.question_id, answer.value);
        }
        set
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    /// Decode a list of answers; a repeated id keeps the last value
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Answer>::deserialize(deserializer).map(|answers| answers.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

/// A single user interaction with a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Pick an option of a rating or single-choice question
    Choose(String),
    /// Check or uncheck an option of a multiple-choice question
    Toggle(String),
    /// Replace the text of a free-text question
    Text(String),
}

/// Compute the list-form value that results from applying `edit` to a
/// question whose current value is `current`.
pub fn apply_edit(
    question: &Question,
    current: Option<&AnswerValue>,
    edit: FieldEdit,
) -> SurveyResult<Vec<String>> {
    let field = format!("question {}", question.id);
    match (question.kind, edit) {
        (QuestionType::Rating | QuestionType::Single, FieldEdit::Choose(option)) => {
            if !question.has_option(&option) {
                return Err(SurveyError::validation(
                    field,
                    format!("'{}' is not one of the available options", option),
                ));
            }
            Ok(vec![option])
        }
        (QuestionType::Multiple, FieldEdit::Toggle(option)) => {
            if !question.has_option(&option) {
                return Err(SurveyError::validation(
                    field,
                    format!("'{}' is not one of the available options", option),
                ));
            }
            let mut values = current.map(AnswerValue::to_list).unwrap_or_default();
            toggle_option(&mut values, &option);
            Ok(values)
        }
        (QuestionType::Text, FieldEdit::Text(text)) => Ok(vec![text]),
        (kind, edit) => Err(SurveyError::validation(
            field,
            format!("{:?} does not apply to a {} question", edit, kind),
        )),
    }
}

/// Append `option` if absent, otherwise remove its first occurrence
pub fn toggle_option(values: &mut Vec<String>, option: &str) {
    match values.iter().position(|v| v == option) {
        Some(idx) => {
            values.remove(idx);
        }
        None => values.push(option.to_string()),
    }
}
