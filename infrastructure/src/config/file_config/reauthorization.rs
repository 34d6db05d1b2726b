//! Reauthorization configuration from TOML (`[reauthorization]` section)

use serde::{Deserialize, Serialize};
use slotguard_application::{AuthorizationStatus, ReauthorizationParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReauthorizationConfig {
    /// Minimum hours between two reauthorization notices
    pub window_hours: u32,
    /// Authorization status reported by the host (`granted` or `required`)
    pub status: AuthorizationStatus,
}

impl Default for FileReauthorizationConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            status: AuthorizationStatus::Granted,
        }
    }
}

impl FileReauthorizationConfig {
    pub fn to_params(&self) -> ReauthorizationParams {
        ReauthorizationParams::default()
            .with_window(chrono::Duration::hours(i64::from(self.window_hours)))
    }
}
