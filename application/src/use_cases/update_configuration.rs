//! Update Configuration use case
//!
//! Toggles gating for one question on behalf of the current identity:
//!
//! ```text
//! caller ─▶ OwnershipGuard ─▶ ConfigurationStore::set_enabled ─▶ TriggerRegistrar
//!              │
//!              └─ Locked { owner } ─▶ nothing written
//! ```

use crate::ports::host::IdentityPort;
use crate::ports::property_store::{PropertyStore, StoreError};
use crate::ports::trigger::{TriggerError, TriggerRegistrar};
use crate::use_cases::configuration_store::{ConfigurationSnapshot, ConfigurationStore};
use slotguard_domain::{DomainError, OwnershipCheck, QuestionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while changing configuration
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A different identity owns the configuration
    #[error(
        "Only the first user who configured these settings can change them. Please ask {owner} to modify these settings"
    )]
    Locked { owner: String },

    #[error("Invalid request: {0}")]
    Invalid(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration saved but trigger adjustment failed: {0}")]
    Trigger(#[from] TriggerError),
}

impl ConfigurationError {
    pub fn is_locked(&self) -> bool {
        matches!(self, ConfigurationError::Locked { .. })
    }
}

/// Enforces first-writer-wins ownership of the configuration.
pub struct OwnershipGuard<S: PropertyStore + 'static> {
    store: ConfigurationStore<S>,
}

impl<S: PropertyStore + 'static> OwnershipGuard<S> {
    pub fn new(store: ConfigurationStore<S>) -> Self {
        Self { store }
    }

    /// Admit `caller` as the configuration writer, recording them as owner
    /// when nobody owns it yet.
    ///
    /// Returns [`ConfigurationError::Locked`] without writing anything when
    /// another identity is the owner.
    pub async fn admit(&self, caller: &str) -> Result<(), ConfigurationError> {
        let recorded = self.store.owner().await?;

        match OwnershipCheck::evaluate(recorded.as_deref(), caller)? {
            OwnershipCheck::Owner => Ok(()),
            OwnershipCheck::Locked { owner } => {
                warn!(caller, owner = %owner, "Rejected configuration change from non-owner");
                Err(ConfigurationError::Locked { owner })
            }
            OwnershipCheck::Claim => {
                let owner = self.store.claim_owner(caller.trim()).await?;
                match OwnershipCheck::evaluate(Some(owner.as_str()), caller)? {
                    OwnershipCheck::Locked { owner } => {
                        warn!(caller, owner = %owner, "Lost ownership claim to concurrent writer");
                        Err(ConfigurationError::Locked { owner })
                    }
                    _ => {
                        info!(owner = caller, "Recorded configuration owner");
                        Ok(())
                    }
                }
            }
        }
    }
}

/// Use case behind the `setEnabled` UI operation
pub struct UpdateConfigurationUseCase<S: PropertyStore + 'static> {
    store: ConfigurationStore<S>,
    guard: OwnershipGuard<S>,
    trigger: Arc<dyn TriggerRegistrar>,
    identity: Arc<dyn IdentityPort>,
}

impl<S: PropertyStore + 'static> UpdateConfigurationUseCase<S> {
    pub fn new(
        store: Arc<S>,
        trigger: Arc<dyn TriggerRegistrar>,
        identity: Arc<dyn IdentityPort>,
    ) -> Self {
        let store = ConfigurationStore::new(store);
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
            trigger,
            identity,
        }
    }

    /// Enable or disable gating for `question_id`.
    ///
    /// Returns the full refreshed configuration so callers can redraw
    /// without another round trip.
    pub async fn set_enabled(
        &self,
        question_id: &QuestionId,
        enabled: bool,
    ) -> Result<ConfigurationSnapshot, ConfigurationError> {
        let caller = self.identity.current_user_email();
        self.guard.admit(&caller).await?;

        let snapshot = self.store.set_enabled(question_id, enabled).await?;
        info!(question = %question_id, enabled, "Updated question configuration");

        let action = self
            .trigger
            .adjust_form_submit_trigger(caller.trim(), &snapshot.configuration)
            .await?;
        debug!(?action, "Adjusted form submit trigger");

        Ok(snapshot)
    }
}
