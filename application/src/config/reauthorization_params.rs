//! Reauthorization notice rate limiting.

use chrono::Duration;

/// Parameters for [`ReauthorizationNotifier`](crate::use_cases::notify_reauthorization::ReauthorizationNotifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReauthorizationParams {
    /// At most one notice is sent per window.
    pub window: Duration,
}

impl Default for ReauthorizationParams {
    fn default() -> Self {
        Self {
            window: Duration::hours(24),
        }
    }
}

impl ReauthorizationParams {
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}
