//! Configuration store
//!
//! Reads and writes per-question settings in the document property bag.
//! Each question lives under its own key (`QUESTION_ID:<id>`), so writes to
//! different questions never touch each other's records.

use crate::ports::property_store::{PropertyStore, StoreError};
use serde::Serialize;
use slotguard_domain::{
    Configuration, ConfigurationDecodeError, PropertyKey, QuestionId, QuestionSettings,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration as read from the store, plus every entry that failed to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigurationSnapshot {
    pub configuration: Configuration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decode_errors: Vec<ConfigurationDecodeError>,
}

/// Typed access to question settings over a [`PropertyStore`].
pub struct ConfigurationStore<S: PropertyStore + 'static> {
    store: Arc<S>,
}

impl<S: PropertyStore + 'static> Clone for ConfigurationStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: PropertyStore + 'static> ConfigurationStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Read every question's settings.
    ///
    /// An entry that fails to decode is reported in
    /// [`ConfigurationSnapshot::decode_errors`] and left out of the mapping;
    /// it never fails the whole read.
    pub async fn get(&self) -> Result<ConfigurationSnapshot, StoreError> {
        let properties = self.store.get_properties().await?;
        let mut snapshot = ConfigurationSnapshot::default();

        for (key, raw) in &properties {
            let Some(PropertyKey::Question(id)) = PropertyKey::parse(key) else {
                continue;
            };

            match QuestionSettings::decode(raw) {
                Ok(settings) => snapshot.configuration.insert(id, settings),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping undecodable configuration entry");
                    snapshot.decode_errors.push(ConfigurationDecodeError {
                        key: key.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Loaded configuration for {} questions ({} undecodable)",
            snapshot.configuration.len(),
            snapshot.decode_errors.len()
        );
        Ok(snapshot)
    }

    /// Set one question's `enabled` flag and return the refreshed configuration.
    ///
    /// Other fields of the existing record are preserved. A record that no
    /// longer decodes is replaced by a fresh one.
    pub async fn set_enabled(
        &self,
        id: &QuestionId,
        enabled: bool,
    ) -> Result<ConfigurationSnapshot, StoreError> {
        let key = PropertyKey::question(id).as_key();

        let mut settings = match self.store.get_property(&key).await? {
            Some(raw) => QuestionSettings::decode(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Replacing undecodable configuration entry");
                QuestionSettings::default()
            }),
            None => QuestionSettings::default(),
        };
        settings.enabled = enabled;

        let encoded = settings.encode().map_err(|e| StoreError::Encode {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.store.set_property(&key, &encoded).await?;
        debug!(question = %id, enabled, "Stored question settings");

        self.get().await
    }

    /// Recorded owner, if any.
    pub async fn owner(&self) -> Result<Option<String>, StoreError> {
        let owner = self
            .store
            .get_property(&PropertyKey::Owner.as_key())
            .await?;
        Ok(owner.filter(|o| !o.trim().is_empty()))
    }

    /// Record `owner` unless somebody already owns the configuration.
    ///
    /// Returns the owner in place afterwards: `owner` when the claim went
    /// through, the earlier or concurrent claimant otherwise.
    pub(crate) async fn claim_owner(&self, owner: &str) -> Result<String, StoreError> {
        let key = PropertyKey::Owner.as_key();
        let current = self.store.get_property(&key).await?;
        if let Some(existing) = current.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
            return Ok(existing.to_string());
        }

        if self
            .store
            .compare_and_set(&key, current.as_deref(), Some(owner))
            .await?
        {
            return Ok(owner.to_string());
        }
        self.owner().await?.ok_or_else(|| {
            StoreError::Unavailable("owner changed while it was being claimed".to_string())
        })
    }
}
