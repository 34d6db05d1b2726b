//! Single-owner rule for configuration writes.
//!
//! The first identity to write configuration becomes its owner. From then on
//! only that identity may change it, which also keeps the submission trigger
//! registered under exactly one authorizing identity.

use crate::core::error::DomainError;

/// Result of checking a caller against the recorded owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipCheck {
    /// No owner recorded yet; the caller claims ownership.
    Claim,
    /// The caller is the recorded owner.
    Owner,
    /// Someone else owns the configuration.
    Locked { owner: String },
}

impl OwnershipCheck {
    /// Decide whether `caller` may write, given the recorded owner.
    ///
    /// A blank recorded owner counts as unset.
    pub fn evaluate(recorded: Option<&str>, caller: &str) -> Result<Self, DomainError> {
        if caller.trim().is_empty() {
            return Err(DomainError::EmptyIdentity);
        }

        Ok(match recorded.map(str::trim).filter(|o| !o.is_empty()) {
            None => OwnershipCheck::Claim,
            Some(owner) if owner == caller.trim() => OwnershipCheck::Owner,
            Some(owner) => OwnershipCheck::Locked {
                owner: owner.to_string(),
            },
        })
    }

    pub fn is_allowed(&self) -> bool {
        !matches!(self, OwnershipCheck::Locked { .. })
    }
}
