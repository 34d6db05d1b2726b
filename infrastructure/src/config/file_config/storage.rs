//! Storage locations from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the document state lives on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Document property bag (owner, per-question settings, trigger, markers)
    pub properties_path: PathBuf,
    /// Form document with versioned choice pools
    pub form_path: PathBuf,
    /// Mail outbox (JSONL)
    pub outbox_path: PathBuf,
    /// Submission event log (JSONL); disabled when unset
    pub submission_log_path: Option<PathBuf>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            properties_path: PathBuf::from(".slotguard/properties.json"),
            form_path: PathBuf::from(".slotguard/form.json"),
            outbox_path: PathBuf::from(".slotguard/outbox.jsonl"),
            submission_log_path: None,
        }
    }
}
