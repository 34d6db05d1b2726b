//! Depletion configuration from TOML (`[depletion]` section)
//!
//! ```toml
//! [depletion]
//! placeholder_text = "Fully booked"
//! max_write_attempts = 5
//! retry_backoff_ms = 25
//! ```

use serde::{Deserialize, Serialize};
use slotguard_application::DepletionParams;
use slotguard_domain::DEFAULT_BACKUP_TEXT;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDepletionConfig {
    /// Option shown once every real option is taken
    pub placeholder_text: String,
    /// Versioned write attempts per response before giving up
    pub max_write_attempts: u32,
    /// First retry delay in milliseconds, doubled on every conflict
    pub retry_backoff_ms: u64,
}

impl Default for FileDepletionConfig {
    fn default() -> Self {
        Self {
            placeholder_text: DEFAULT_BACKUP_TEXT.to_string(),
            max_write_attempts: 5,
            retry_backoff_ms: 25,
        }
    }
}

impl FileDepletionConfig {
    pub fn to_params(&self) -> DepletionParams {
        DepletionParams::default()
            .with_placeholder_text(self.placeholder_text.trim())
            .with_max_write_attempts(self.max_write_attempts)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}
