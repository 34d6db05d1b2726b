//! Application layer for slotguard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DepletionParams, ReauthorizationParams};
pub use ports::{
    form_gateway::{FormError, FormGateway, PoolSnapshot, PoolWrite},
    host::{AuthorizationPort, AuthorizationStatus, Clock, IdentityPort, SystemClock},
    notification::{NotificationError, NotificationSender},
    property_store::{PropertyStore, StoreError},
    submission_logger::{NoSubmissionLogger, SubmissionLogEntry, SubmissionLogger},
    trigger::{TriggerError, TriggerRegistrar},
};
pub use use_cases::configuration_store::{ConfigurationSnapshot, ConfigurationStore};
pub use use_cases::handle_submission::HandleSubmissionUseCase;
pub use use_cases::list_questions::ListQuestionsUseCase;
pub use use_cases::notify_reauthorization::{ReauthorizationError, ReauthorizationNotifier};
pub use use_cases::update_configuration::{
    ConfigurationError, OwnershipGuard, UpdateConfigurationUseCase,
};
