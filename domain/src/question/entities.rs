//! Question identity and type value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable, opaque identifier of a form item (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a new question id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Question id cannot be empty");
        Self(id)
    }

    /// Try to create a new question id, rejecting blank input
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(DomainError::EmptyQuestionId)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::new(s)
    }
}

/// Type of a form item, named after the host's item type constants.
///
/// Only [`MultipleChoice`](QuestionType::MultipleChoice), [`List`](QuestionType::List)
/// and [`Checkbox`](QuestionType::Checkbox) expose a choice pool and can be gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    List,
    Checkbox,
    Text,
    ParagraphText,
    Scale,
    Date,
    Time,
    /// Any host item type this crate does not model
    #[serde(other)]
    Other,
}

impl QuestionType {
    /// Whether questions of this type carry a fixed textual choice set.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::List | QuestionType::Checkbox
        )
    }

    /// Whether a respondent may select several values at once.
    pub fn is_multi_answer(&self) -> bool {
        matches!(self, QuestionType::Checkbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::List => "LIST",
            QuestionType::Checkbox => "CHECKBOX",
            QuestionType::Text => "TEXT",
            QuestionType::ParagraphText => "PARAGRAPH_TEXT",
            QuestionType::Scale => "SCALE",
            QuestionType::Date => "DATE",
            QuestionType::Time => "TIME",
            QuestionType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MULTIPLE_CHOICE" => Ok(QuestionType::MultipleChoice),
            "LIST" => Ok(QuestionType::List),
            "CHECKBOX" => Ok(QuestionType::Checkbox),
            "TEXT" => Ok(QuestionType::Text),
            "PARAGRAPH_TEXT" => Ok(QuestionType::ParagraphText),
            "SCALE" => Ok(QuestionType::Scale),
            "DATE" => Ok(QuestionType::Date),
            "TIME" => Ok(QuestionType::Time),
            other => Err(DomainError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// A form item as enumerated from the live form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormItem {
    pub id: QuestionId,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl FormItem {
    pub fn new(id: impl Into<QuestionId>, title: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            question_type,
        }
    }
}

/// Read-only snapshot of a question whose choices can be gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedQuestion {
    pub id: QuestionId,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl SupportedQuestion {
    /// Snapshot a form item, or `None` when its type has no choice pool.
    pub fn from_item(item: &FormItem) -> Option<Self> {
        item.question_type.is_supported().then(|| Self {
            id: item.id.clone(),
            title: item.title.clone(),
            question_type: item.question_type,
        })
    }
}
