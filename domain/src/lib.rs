//! Domain layer for slotguard
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Gated questions
//!
//! A survey owner marks choice questions as *single-use*: once a respondent
//! picks an option, that option is no longer offered to anyone else.
//!
//! - **ChoicePool**: the ordered options a question currently offers
//! - **Depletion**: removing a respondent's selection from the pool; a pool
//!   is never left empty, the placeholder text takes the last slot
//! - **Owner**: the first identity to write configuration, the only one
//!   allowed to change it afterwards

pub mod configuration;
pub mod core;
pub mod pool;
pub mod question;
pub mod submission;

// Re-export commonly used types
pub use configuration::{
    keys::PropertyKey,
    ownership::OwnershipCheck,
    settings::{Configuration, ConfigurationDecodeError, QuestionSettings},
    trigger::{TriggerAction, TriggerRegistration},
};
pub use core::error::DomainError;
pub use pool::choice_pool::{
    ChoicePool, DEFAULT_BACKUP_TEXT, Depletion, deplete, deplete_with_placeholder,
};
pub use question::{
    answer::{Answer, FormResponse, ItemRef, ItemResponse, SubmissionEvent, SubmissionResponse},
    entities::{FormItem, QuestionId, QuestionType, SupportedQuestion},
};
pub use submission::entities::{
    ResponseOutcome, ResponseStatus, SkipReason, SubmissionOutcome, SubmissionState,
};
