//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where appropriate.

mod depletion;
mod identity;
mod reauthorization;
mod storage;

pub use depletion::FileDepletionConfig;
pub use identity::FileIdentityConfig;
pub use reauthorization::FileReauthorizationConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("depletion.max_write_attempts cannot be 0")]
    ZeroWriteAttempts,

    #[error("depletion.placeholder_text cannot be empty")]
    EmptyPlaceholder,

    #[error("reauthorization.window_hours cannot be 0")]
    ZeroReauthorizationWindow,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub storage: FileStorageConfig,
    pub depletion: FileDepletionConfig,
    pub reauthorization: FileReauthorizationConfig,
    pub identity: FileIdentityConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.depletion.max_write_attempts == 0 {
            issues.push(ConfigValidationError::ZeroWriteAttempts);
        }
        if self.depletion.placeholder_text.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyPlaceholder);
        }
        if self.reauthorization.window_hours == 0 {
            issues.push(ConfigValidationError::ZeroReauthorizationWindow);
        }

        issues
    }
}
