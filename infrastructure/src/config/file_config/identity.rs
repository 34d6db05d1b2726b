//! Caller identity from TOML (`[identity]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Email of the caller; `--as` takes precedence
    pub email: Option<String>,
}

impl FileIdentityConfig {
    /// Resolve the caller, preferring an explicit override.
    pub fn resolve(&self, override_email: Option<&str>) -> Option<String> {
        override_email
            .or(self.email.as_deref())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
    }
}
