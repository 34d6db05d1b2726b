//! Port for structured submission logging.
//!
//! Defines the [`SubmissionLogger`] trait for recording what the submission
//! handler did (pools depleted, responses skipped, failures swallowed) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per event (JSONL).

use serde_json::Value;

/// A structured submission event for logging.
///
/// Each entry has a kind string and a JSON payload containing
/// event-specific fields. Timestamps are added by the writer.
pub struct SubmissionLogEntry {
    /// Event kind (e.g., "submission_received", "pool_depleted").
    pub kind: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SubmissionLogEntry {
    pub fn new(kind: &'static str, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Port for logging submission events to a structured log.
///
/// The `log` method is synchronous and non-fallible: a logging failure
/// must never disturb submission processing.
pub trait SubmissionLogger: Send + Sync {
    /// Record a submission event.
    fn log(&self, entry: SubmissionLogEntry);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSubmissionLogger;

impl SubmissionLogger for NoSubmissionLogger {
    fn log(&self, _entry: SubmissionLogEntry) {}
}
