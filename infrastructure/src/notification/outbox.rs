//! Mail outbox: notifications are appended to a JSONL file for a mail relay to pick up.

use crate::logging::jsonl_writer::{JsonlWriter, timestamp};
use async_trait::async_trait;
use slotguard_application::ports::notification::{NotificationError, NotificationSender};
use std::path::Path;
use tracing::debug;

const REAUTH_SUBJECT: &str = "Authorization required";
const REAUTH_BODY: &str = "The single-use choices add-on needs to be re-authorized before it \
can keep removing claimed options from your form. Open the form, start the add-on from the \
add-ons menu and follow the authorization prompt.";

pub struct JsonlOutbox {
    writer: JsonlWriter,
}

impl JsonlOutbox {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            writer: JsonlWriter::open(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

#[async_trait]
impl NotificationSender for JsonlOutbox {
    async fn send_reauthorization_request(&self, recipient: &str) -> Result<(), NotificationError> {
        let recipient = recipient.trim();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(NotificationError::InvalidRecipient(recipient.to_string()));
        }

        let message = serde_json::json!({
            "type": "reauthorization_request",
            "timestamp": timestamp(),
            "to": recipient,
            "subject": REAUTH_SUBJECT,
            "body": REAUTH_BODY,
        });
        self.writer
            .append(&message)
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        debug!(to = recipient, outbox = %self.path().display(), "Queued reauthorization mail");
        Ok(())
    }
}
