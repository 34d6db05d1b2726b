//! Form gateway port
//!
//! Defines how the application reads the live form's items and rewrites
//! their choice pools. Pools are versioned: a write names the version it
//! was computed from and is refused if the pool moved on in between.
//! Adapters must make that check and the rewrite one atomic step against
//! every writer of the same form, including other processes. Only then
//! can concurrent submissions not overwrite each other's removals.

use async_trait::async_trait;
use slotguard_domain::{ChoicePool, FormItem, QuestionId, QuestionType};
use thiserror::Error;

/// Errors that can occur during form gateway operations
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Question {id} is {actual}, not {expected}")]
    TypeMismatch {
        id: QuestionId,
        expected: QuestionType,
        actual: QuestionType,
    },

    #[error("Question type {0} has no choice pool")]
    UnsupportedType(QuestionType),

    #[error("Form unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FormError {
    /// Whether the error means the question no longer resolves
    pub fn is_not_found(&self) -> bool {
        matches!(self, FormError::QuestionNotFound(_))
    }
}

/// A choice pool together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub pool: ChoicePool,
    pub version: u64,
}

/// Result of a versioned pool write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolWrite {
    /// The pool was replaced; `version` is the new version
    Written { version: u64 },
    /// The pool changed since it was read; nothing was written
    Conflict { current_version: u64 },
}

/// Gateway to the live form.
///
/// MultipleChoice, List and Checkbox items expose the same pool shape;
/// implementations dispatch on `question_type`.
#[async_trait]
pub trait FormGateway: Send + Sync {
    /// Enumerate every item on the form, in form order
    async fn list_items(&self) -> Result<Vec<FormItem>, FormError>;

    /// Read a question's current pool and its version
    async fn get_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
    ) -> Result<PoolSnapshot, FormError>;

    /// Replace a question's pool if it is still at `expected_version`
    async fn set_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
        expected_version: u64,
        pool: &ChoicePool,
    ) -> Result<PoolWrite, FormError>;
}
