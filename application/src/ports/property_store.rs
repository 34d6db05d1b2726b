//! Property store port
//!
//! Defines the document-scoped key/value bag that holds configuration.
//! Plain reads and writes are last-writer-wins. A read-modify-write that
//! must not race with another invocation goes through `compare_and_set`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during property store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Property store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Property bag is corrupt: {0}")]
    Corrupt(String),

    #[error("Could not encode value for {key}: {message}")]
    Encode { key: String, message: String },
}

/// Flat string-to-string property bag for one document.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Read a single property
    async fn get_property(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Read every property
    async fn get_properties(&self) -> Result<BTreeMap<String, String>, StoreError>;

    /// Write a single property, replacing any previous value
    async fn set_property(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a single property; removing a missing key is not an error
    async fn delete_property(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically replace `key` if it still holds `expected`.
    ///
    /// `None` stands for an absent key on either side, so
    /// `compare_and_set(k, None, Some(v))` creates `k` only if nobody did
    /// first and `compare_and_set(k, Some(v), None)` deletes it only if it
    /// is still `v`. Returns `false`, leaving the bag untouched, when the
    /// current value differs. The check and the write must be atomic
    /// against every other writer of the same bag.
    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> Result<bool, StoreError>;
}
