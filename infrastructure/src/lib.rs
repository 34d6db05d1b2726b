//! Infrastructure layer for slotguard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod form;
pub mod host;
pub mod logging;
pub mod notification;
mod persist;
pub mod store;
pub mod trigger;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDepletionConfig, FileIdentityConfig,
    FileReauthorizationConfig, FileStorageConfig,
};
pub use form::{FormDocument, FormDocumentItem, InMemoryFormGateway, JsonFileFormGateway};
pub use host::{StaticAuthorization, StaticIdentity};
pub use logging::JsonlSubmissionLogger;
pub use notification::JsonlOutbox;
pub use store::{InMemoryPropertyStore, JsonFilePropertyStore};
pub use trigger::PropertyTriggerRegistrar;
