//! In-progress answers for a survey-taking session

use crate::answer::{Answer, AnswerSet, AnswerValue};
use crate::catalog::{Catalog, QuestionId};

/// Holds the answers being composed for a first submission.
///
/// Writes are permissive: any question id is accepted. Progress only counts
/// answers to questions that exist in the catalog.
#[derive(Debug, Clone)]
pub struct AnswerStore<'c> {
    catalog: &'c Catalog,
    answers: AnswerSet,
}

impl<'c> AnswerStore<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            answers: AnswerSet::new(),
        }
    }

    /// Record the current answer for `question_id`, replacing any earlier one
    pub fn set_answer(&mut self, question_id: QuestionId, value: impl Into<AnswerValue>) {
        let value = value.into();
        tracing::trace!(question_id, ?value, "answer set");
        self.answers.upsert(question_id, value);
    }

    pub fn get_answer(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Fraction of catalog questions answered, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        let total = self.catalog.len();
        if total == 0 {
            return 0.0;
        }
        let answered = self
            .answers
            .iter()
            .filter(|a| self.catalog.contains(a.question_id))
            .count();
        answered as f64 / total as f64
    }

    /// Progress as a whole percentage, rounded to nearest
    pub fn percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }

    /// Whether every catalog question has an answer
    pub fn is_complete(&self) -> bool {
        self.catalog
            .all()
            .iter()
            .all(|q| self.answers.contains(q.id))
    }

    /// Catalog questions that have no answer yet, in catalog order
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.catalog
            .all()
            .iter()
            .filter(|q| !self.answers.contains(q.id))
            .map(|q| q.id)
            .collect()
    }
}
