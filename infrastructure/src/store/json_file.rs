//! Property bag persisted as a single JSON object on disk.
//!
//! Every write holds the bag's document lock across load, modify and save,
//! then rewrites the file through a unique temporary sibling and a rename.
//! Readers never observe a half-written bag and writers in other processes
//! never drop each other's keys.

use crate::persist::{DocumentLock, atomic_write};
use async_trait::async_trait;
use slotguard_application::ports::property_store::{PropertyStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Document property bag stored at `path`.
pub struct JsonFilePropertyStore {
    path: PathBuf,
}

impl JsonFilePropertyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn lock(&self) -> Result<DocumentLock, StoreError> {
        DocumentLock::acquire(&self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("{}: could not lock: {}", self.path.display(), e))
        })
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", self.path.display(), e))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(values).map_err(|e| StoreError::Encode {
            key: "*".to_string(),
            message: e.to_string(),
        })?;
        atomic_write(&self.path, &encoded)
            .map_err(|e| StoreError::Io(format!("{}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), entries = values.len(), "Saved property bag");
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for JsonFilePropertyStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    async fn get_properties(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.load()
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _lock = self.lock().await?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    async fn delete_property(&self, key: &str) -> Result<(), StoreError> {
        let _lock = self.lock().await?;
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> Result<bool, StoreError> {
        let _lock = self.lock().await?;
        let mut values = self.load()?;
        if values.get(key).map(String::as_str) != expected {
            debug!(key, "Property changed since it was read");
            return Ok(false);
        }
        match new {
            Some(value) => values.insert(key.to_string(), value.to_string()),
            None => values.remove(key),
        };
        self.save(&values)?;
        Ok(true)
    }
}
