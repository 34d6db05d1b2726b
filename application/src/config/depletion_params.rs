//! Depletion parameters: submission handler write control.
//!
//! [`DepletionParams`] groups the static parameters that control how the
//! [`HandleSubmissionUseCase`](crate::use_cases::handle_submission::HandleSubmissionUseCase)
//! rewrites choice pools. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use slotguard_domain::DEFAULT_BACKUP_TEXT;
use std::time::Duration;

/// Pool write control parameters.
///
/// A pool write that loses a version race is retried: the pool is re-read,
/// depletion is recomputed, and the write is attempted again after a backoff
/// that doubles on every conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepletionParams {
    /// Option substituted when depletion would empty a pool.
    pub placeholder_text: String,
    /// Maximum versioned write attempts per response (at least 1).
    pub max_write_attempts: u32,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
}

impl Default for DepletionParams {
    fn default() -> Self {
        Self {
            placeholder_text: DEFAULT_BACKUP_TEXT.to_string(),
            max_write_attempts: 5,
            retry_backoff: Duration::from_millis(25),
        }
    }
}

impl DepletionParams {
    // ==================== Builder Methods ====================

    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts.max(1);
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Backoff to wait after the given (1-based) failed attempt.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.retry_backoff.saturating_mul(1u32 << exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DepletionParams::default();
        assert_eq!(params.placeholder_text, DEFAULT_BACKUP_TEXT);
        assert_eq!(params.max_write_attempts, 5);
        assert_eq!(params.retry_backoff, Duration::from_millis(25));
    }

    #[test]
    fn test_attempts_floor_at_one() {
        let params = DepletionParams::default().with_max_write_attempts(0);
        assert_eq!(params.max_write_attempts, 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let params = DepletionParams::default().with_retry_backoff(Duration::from_millis(10));
        assert_eq!(params.backoff_after(1), Duration::from_millis(10));
        assert_eq!(params.backoff_after(2), Duration::from_millis(20));
        assert_eq!(params.backoff_after(3), Duration::from_millis(40));
    }
}
