//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question id cannot be empty")]
    EmptyQuestionId,

    #[error("Caller identity cannot be empty")]
    EmptyIdentity,

    #[error("Unknown question type: {0}")]
    UnknownQuestionType(String),
}
