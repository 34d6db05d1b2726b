//! Outbound notification port

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while sending a notification
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Port for telling the owner that the add-on needs re-authorization
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send_reauthorization_request(&self, recipient: &str) -> Result<(), NotificationError>;
}
