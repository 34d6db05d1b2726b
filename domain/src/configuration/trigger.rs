//! Submission trigger registration policy

use serde::{Deserialize, Serialize};

/// Persisted registration of the submission trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRegistration {
    /// Identity the trigger runs as
    pub owner: String,
    /// RFC 3339 timestamp of installation
    pub installed_at: String,
}

/// What to do with the trigger after a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Install,
    Remove,
    Keep,
}

impl TriggerAction {
    /// The trigger exists exactly while at least one question is gated.
    pub fn plan(installed: bool, any_enabled: bool) -> Self {
        match (installed, any_enabled) {
            (false, true) => TriggerAction::Install,
            (true, false) => TriggerAction::Remove,
            _ => TriggerAction::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_plan() {
        assert_eq!(TriggerAction::plan(false, true), TriggerAction::Install);
        assert_eq!(TriggerAction::plan(true, false), TriggerAction::Remove);
        assert_eq!(TriggerAction::plan(true, true), TriggerAction::Keep);
        assert_eq!(TriggerAction::plan(false, false), TriggerAction::Keep);
    }
}
