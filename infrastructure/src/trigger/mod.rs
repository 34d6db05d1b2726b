//! Submission trigger registration kept in the document property bag.
//!
//! The trigger is installed while any question is gated and removed once
//! none is. The registration records the identity it runs as.

use async_trait::async_trait;
use slotguard_application::ports::property_store::PropertyStore;
use slotguard_application::ports::trigger::{TriggerError, TriggerRegistrar};
use slotguard_domain::{Configuration, PropertyKey, TriggerAction, TriggerRegistration};
use std::sync::Arc;
use tracing::{info, warn};

pub struct PropertyTriggerRegistrar<S: PropertyStore + 'static> {
    store: Arc<S>,
}

impl<S: PropertyStore + 'static> PropertyTriggerRegistrar<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current registration, if any.
    pub async fn registration(&self) -> Result<Option<TriggerRegistration>, TriggerError> {
        let raw = self
            .store
            .get_property(&PropertyKey::Trigger.as_key())
            .await
            .map_err(|e| TriggerError::Unavailable(e.to_string()))?;

        Ok(raw.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(registration) => Some(registration),
            Err(e) => {
                // An unreadable registration is treated as absent and rewritten
                warn!(error = %e, "Ignoring unreadable trigger registration");
                None
            }
        }))
    }
}

#[async_trait]
impl<S: PropertyStore + 'static> TriggerRegistrar for PropertyTriggerRegistrar<S> {
    async fn adjust_form_submit_trigger(
        &self,
        owner: &str,
        configuration: &Configuration,
    ) -> Result<TriggerAction, TriggerError> {
        let key = PropertyKey::Trigger.as_key();
        let installed = self.registration().await?.is_some();
        let action = TriggerAction::plan(installed, configuration.any_enabled());

        match action {
            TriggerAction::Install => {
                let registration = TriggerRegistration {
                    owner: owner.to_string(),
                    installed_at: chrono::Utc::now().to_rfc3339(),
                };
                let encoded = serde_json::to_string(&registration)
                    .map_err(|e| TriggerError::Registration(e.to_string()))?;
                self.store
                    .set_property(&key, &encoded)
                    .await
                    .map_err(|e| TriggerError::Registration(e.to_string()))?;
                info!(owner, "Installed form submit trigger");
            }
            TriggerAction::Remove => {
                self.store
                    .delete_property(&key)
                    .await
                    .map_err(|e| TriggerError::Registration(e.to_string()))?;
                info!("Removed form submit trigger");
            }
            TriggerAction::Keep => {}
        }

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryPropertyStore;
    use slotguard_domain::{QuestionId, QuestionSettings};

    fn configuration(enabled: bool) -> Configuration {
        let settings = QuestionSettings {
            enabled,
            ..Default::default()
        };
        [(QuestionId::new("1"), settings)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_install_keep_remove() {
        let store = Arc::new(InMemoryPropertyStore::new());
        let registrar = PropertyTriggerRegistrar::new(store.clone());

        let action = registrar
            .adjust_form_submit_trigger("ada@example.com", &configuration(true))
            .await
            .unwrap();
        assert_eq!(action, TriggerAction::Install);
        assert_eq!(
            registrar.registration().await.unwrap().unwrap().owner,
            "ada@example.com"
        );

        let action = registrar
            .adjust_form_submit_trigger("ada@example.com", &configuration(true))
            .await
            .unwrap();
        assert_eq!(action, TriggerAction::Keep);

        let action = registrar
            .adjust_form_submit_trigger("ada@example.com", &configuration(false))
            .await
            .unwrap();
        assert_eq!(action, TriggerAction::Remove);
        assert!(store.get_property("TRIGGER").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_nothing_enabled_installs_nothing() {
        let store = Arc::new(InMemoryPropertyStore::new());
        let registrar = PropertyTriggerRegistrar::new(store);

        let action = registrar
            .adjust_form_submit_trigger("ada@example.com", &Configuration::new())
            .await
            .unwrap();
        assert_eq!(action, TriggerAction::Keep);
        assert!(registrar.registration().await.unwrap().is_none());
    }
}
