//! Host environment adapters driven by configuration.

use async_trait::async_trait;
use slotguard_application::ports::host::{AuthorizationPort, AuthorizationStatus, IdentityPort};

/// Authorization status fixed at startup (from `[reauthorization] status`).
pub struct StaticAuthorization {
    status: AuthorizationStatus,
}

impl StaticAuthorization {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self { status }
    }
}

#[async_trait]
impl AuthorizationPort for StaticAuthorization {
    async fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }
}

/// Caller identity fixed at startup (from `[identity] email` or `--as`).
pub struct StaticIdentity {
    email: String,
}

impl StaticIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl IdentityPort for StaticIdentity {
    fn current_user_email(&self) -> String {
        self.email.clone()
    }
}
