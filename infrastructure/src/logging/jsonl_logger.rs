//! JSONL file writer for submission events.
//!
//! Each [`SubmissionLogEntry`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file.

use super::jsonl_writer::{JsonlWriter, timestamp};
use slotguard_application::ports::submission_logger::{SubmissionLogEntry, SubmissionLogger};
use std::path::Path;
use tracing::warn;

/// Submission logger that writes one JSON object per line.
pub struct JsonlSubmissionLogger {
    writer: JsonlWriter,
}

impl JsonlSubmissionLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match JsonlWriter::open(path) {
            Ok(writer) => Some(Self { writer }),
            Err(e) => {
                warn!(
                    "Could not open submission log {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

impl SubmissionLogger for JsonlSubmissionLogger {
    fn log(&self, entry: SubmissionLogEntry) {
        // Build the record: merge payload with type + timestamp
        let record = if let serde_json::Value::Object(mut map) = entry.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(entry.kind.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp()),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": entry.kind,
                "timestamp": timestamp(),
                "data": entry.payload,
            })
        };

        // Logging must never disturb submission processing
        let _ = self.writer.append(&record);
    }
}
