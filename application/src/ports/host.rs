//! Host environment ports: authorization, identity, clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization state of the installed add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    #[default]
    Granted,
    /// The user must re-authorize before triggers may act
    Required,
}

impl std::str::FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "granted" => Ok(AuthorizationStatus::Granted),
            "required" => Ok(AuthorizationStatus::Required),
            other => Err(format!("unknown authorization status: {}", other)),
        }
    }
}

/// Port for querying the host's authorization status
#[async_trait]
pub trait AuthorizationPort: Send + Sync {
    async fn authorization_status(&self) -> AuthorizationStatus;
}

/// Port for the identity of the current caller
pub trait IdentityPort: Send + Sync {
    fn current_user_email(&self) -> String;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
