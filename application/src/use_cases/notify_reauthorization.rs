//! Reauthorization notifier
//!
//! Tells the owner that the add-on needs to be re-authorized, at most once
//! per window. The last send time is kept in the property bag under
//! `LAST_REAUTH_NOTICE`, so the limit holds across invocations.

use crate::config::ReauthorizationParams;
use crate::ports::host::{Clock, IdentityPort};
use crate::ports::notification::{NotificationError, NotificationSender};
use crate::ports::property_store::{PropertyStore, StoreError};
use chrono::{DateTime, Utc};
use slotguard_domain::PropertyKey;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ReauthorizationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

pub struct ReauthorizationNotifier<S: PropertyStore + 'static> {
    store: Arc<S>,
    sender: Arc<dyn NotificationSender>,
    identity: Arc<dyn IdentityPort>,
    clock: Arc<dyn Clock>,
    params: ReauthorizationParams,
}

impl<S: PropertyStore + 'static> ReauthorizationNotifier<S> {
    pub fn new(
        store: Arc<S>,
        sender: Arc<dyn NotificationSender>,
        identity: Arc<dyn IdentityPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            sender,
            identity,
            clock,
            params: ReauthorizationParams::default(),
        }
    }

    pub fn with_params(mut self, params: ReauthorizationParams) -> Self {
        self.params = params;
        self
    }

    /// Send a reauthorization notice unless one went out within the window.
    ///
    /// Returns whether a notice was sent. The marker is claimed with a
    /// compare-and-set before sending, so of several concurrent calls only
    /// the one that moved the marker sends. A failed delivery puts the old
    /// marker back and is retried by the next call.
    pub async fn notify(&self) -> Result<bool, ReauthorizationError> {
        let now = self.clock.now();
        let marker_key = PropertyKey::LastReauthNotice.as_key();

        let previous = self.store.get_property(&marker_key).await?;
        if let Some(last) = previous.as_deref().and_then(parse_marker)
            && now.signed_duration_since(last) < self.params.window
        {
            debug!(last_sent = %last, "Reauthorization notice already sent in window");
            return Ok(false);
        }

        let recipient = self.recipient().await?;
        let claimed = now.to_rfc3339();
        if !self
            .store
            .compare_and_set(&marker_key, previous.as_deref(), Some(&claimed))
            .await?
        {
            debug!("Reauthorization notice claimed by a concurrent invocation");
            return Ok(false);
        }

        if let Err(e) = self.sender.send_reauthorization_request(&recipient).await {
            self.release(&marker_key, &claimed, previous.as_deref()).await;
            return Err(e.into());
        }

        info!(recipient = %recipient, "Sent reauthorization notice");
        Ok(true)
    }

    /// Undo a claim after a failed send, unless the marker moved on since.
    async fn release(&self, key: &str, claimed: &str, previous: Option<&str>) {
        match self.store.compare_and_set(key, Some(claimed), previous).await {
            Ok(true) => debug!("Released reauthorization marker"),
            Ok(false) => debug!("Reauthorization marker changed after claim, leaving it"),
            Err(e) => warn!(error = %e, "Could not release reauthorization marker"),
        }
    }

    /// The recorded owner, falling back to the current identity.
    async fn recipient(&self) -> Result<String, StoreError> {
        let owner = self
            .store
            .get_property(&PropertyKey::Owner.as_key())
            .await?
            .filter(|o| !o.trim().is_empty());
        Ok(owner.unwrap_or_else(|| self.identity.current_user_email()))
    }
}

fn parse_marker(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Some(at.with_timezone(&Utc)),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unreadable reauthorization marker");
            None
        }
    }
}
