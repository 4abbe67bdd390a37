//! Question catalog
//!
//! The questionnaire is fixed at process start. Questions are identified by a
//! stable numeric id and always iterated in ascending id order.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable question identifier
pub type QuestionId = u32;

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Pick one point on a numeric scale
    Rating,
    /// Pick exactly one option
    Single,
    /// Pick any number of options
    Multiple,
    /// Free text
    Text,
}

impl QuestionType {
    /// Whether answers to this question are chosen from `options`
    pub fn has_options(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rating => "rating",
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// A single questionnaire entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Descriptions of the two ends of a rating scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<(String, String)>,
}

impl Question {
    fn new(id: QuestionId, text: &str, kind: QuestionType, options: &[&str]) -> Self {
        Self {
            id,
            text: text.to_string(),
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            labels: None,
        }
    }

    fn with_labels(mut self, low: &str, high: &str) -> Self {
        self.labels = Some((low.to_string(), high.to_string()));
        self
    }

    /// Whether `option` is one of this question's choices
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

static STANDARD: Lazy<Catalog> = Lazy::new(|| {
    use QuestionType::*;

    Catalog::new(vec![
        Question::new(
            1,
            "How likely is it that you would recommend our company to a friend or colleague?",
            Rating,
            &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"],
        )
        .with_labels("NOT AT ALL LIKELY", "EXTREMELY LIKELY"),
        Question::new(
            2,
            "Overall, how satisfied or dissatisfied are you with our company?",
            Single,
            &[
                "Very satisfied",
                "Somewhat satisfied",
                "Neither satisfied nor dissatisfied",
                "Somewhat dissatisfied",
                "Very dissatisfied",
            ],
        ),
        Question::new(
            3,
            "Which of the following words would you use to describe our products? Select all that apply.",
            Multiple,
            &[
                "Reliable",
                "High quality",
                "Useful",
                "Unique",
                "Good value for money",
                "Overpriced",
                "Impractical",
                "Ineffective",
                "Poor quality",
                "Unreliable",
            ],
        ),
        Question::new(
            4,
            "How well do our products meet your needs?",
            Single,
            &[
                "Extremely well",
                "Very well",
                "Somewhat well",
                "Not so well",
                "Not at all well",
            ],
        ),
        Question::new(
            5,
            "How would you rate the quality of the product?",
            Single,
            &[
                "Very high quality",
                "High quality",
                "Neither high nor low quality",
                "Low quality",
                "Very low quality",
            ],
        ),
        Question::new(
            6,
            "How would you rate the value for money of the product?",
            Single,
            &["Excellent", "Above average", "Average", "Below average", "Poor"],
        ),
        Question::new(
            7,
            "How responsive have we been to your questions about our services?",
            Single,
            &[
                "Extremely responsive",
                "Very responsive",
                "Somewhat responsive",
                "Not so responsive",
                "Not at all responsive",
                "Not applicable",
            ],
        ),
        Question::new(
            8,
            "How long have you been a customer of our company?",
            Single,
            &[
                "This is my first purchase",
                "Less than six months",
                "Six months to a year",
                "1-2 years",
                "3 or more years",
                "I haven't made a purchase yet",
            ],
        ),
        Question::new(
            9,
            "How likely are you to purchase any of our products again?",
            Single,
            &[
                "Extremely likely",
                "Very likely",
                "Somewhat likely",
                "Not so likely",
                "Not at all likely",
            ],
        ),
        Question::new(
            10,
            "Do you have any other comments, questions, or concerns?",
            Text,
            &[],
        ),
    ])
});

/// Read-only, id-ordered list of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, ordering questions by ascending id.
    ///
    /// Later duplicates of an id are dropped.
    pub fn new(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| q.id);
        questions.dedup_by_key(|q| q.id);
        Self { questions }
    }

    /// The customer satisfaction questionnaire
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// All questions in ascending id order
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions
            .binary_search_by_key(&id, |q| q.id)
            .ok()
            .map(|idx| &self.questions[idx])
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
