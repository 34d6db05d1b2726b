//! In-memory property bag.

use async_trait::async_trait;
use slotguard_application::ports::property_store::{PropertyStore, StoreError};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Property bag kept in process memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            values: RwLock::new(entries),
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("property store lock poisoned".to_string())
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().map_err(|_| poisoned())?.get(key).cloned())
    }

    async fn get_properties(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.values.read().map_err(|_| poisoned())?.clone())
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_property(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        if values.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        match new {
            Some(value) => values.insert(key.to_string(), value.to_string()),
            None => values.remove(key),
        };
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = InMemoryPropertyStore::new();
        store.set_property("OWNER", "ada@example.com").await.unwrap();
        assert_eq!(
            store.get_property("OWNER").await.unwrap().as_deref(),
            Some("ada@example.com")
        );

        store.delete_property("OWNER").await.unwrap();
        store.delete_property("OWNER").await.unwrap();
        assert!(store.get_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compare_and_set_only_replaces_expected_value() {
        let store = InMemoryPropertyStore::new();

        assert!(store.compare_and_set("OWNER", None, Some("ada@example.com")).await.unwrap());
        assert!(!store.compare_and_set("OWNER", None, Some("bob@example.com")).await.unwrap());
        assert!(
            !store
                .compare_and_set("OWNER", Some("bob@example.com"), None)
                .await
                .unwrap()
        );
        assert_eq!(
            store.get_property("OWNER").await.unwrap().as_deref(),
            Some("ada@example.com")
        );

        assert!(
            store
                .compare_and_set("OWNER", Some("ada@example.com"), None)
                .await
                .unwrap()
        );
        assert!(store.get_property("OWNER").await.unwrap().is_none());
    }
}
