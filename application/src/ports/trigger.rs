//! Submission trigger registration port

use async_trait::async_trait;
use slotguard_domain::{Configuration, TriggerAction};
use thiserror::Error;

/// Errors raised while (de)registering the submission trigger
#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Trigger registration failed: {0}")]
    Registration(String),

    #[error("Trigger state unavailable: {0}")]
    Unavailable(String),
}

/// Port for wiring the submission handler to the host.
///
/// Called once after every successful configuration change.
#[async_trait]
pub trait TriggerRegistrar: Send + Sync {
    /// Install or remove the trigger so it matches `configuration`.
    ///
    /// `owner` is the identity the trigger is registered under.
    async fn adjust_form_submit_trigger(
        &self,
        owner: &str,
        configuration: &Configuration,
    ) -> Result<TriggerAction, TriggerError>;
}
