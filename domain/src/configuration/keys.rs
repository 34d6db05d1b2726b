//! Persisted key layout of the document property bag.
//!
//! Every per-question record lives under its own key so that writers
//! touching different questions never clobber each other.

use crate::question::entities::QuestionId;

/// Prefix of every per-question settings key.
pub const QUESTION_PREFIX: &str = "QUESTION_ID:";
/// Identity of the first configuration writer.
pub const OWNER_KEY: &str = "OWNER";
/// Registration state of the submission trigger.
pub const TRIGGER_KEY: &str = "TRIGGER";
/// Timestamp of the last reauthorization notice.
pub const LAST_REAUTH_NOTICE_KEY: &str = "LAST_REAUTH_NOTICE";

/// A typed key into the property bag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Owner,
    Question(QuestionId),
    Trigger,
    LastReauthNotice,
}

impl PropertyKey {
    pub fn question(id: &QuestionId) -> Self {
        PropertyKey::Question(id.clone())
    }

    /// Render the key as stored.
    pub fn as_key(&self) -> String {
        match self {
            PropertyKey::Owner => OWNER_KEY.to_string(),
            PropertyKey::Question(id) => format!("{QUESTION_PREFIX}{id}"),
            PropertyKey::Trigger => TRIGGER_KEY.to_string(),
            PropertyKey::LastReauthNotice => LAST_REAUTH_NOTICE_KEY.to_string(),
        }
    }

    /// Parse a stored key. Unknown keys and blank question ids yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(id) = raw.strip_prefix(QUESTION_PREFIX) {
            return QuestionId::try_new(id).ok().map(PropertyKey::Question);
        }
        match raw {
            OWNER_KEY => Some(PropertyKey::Owner),
            TRIGGER_KEY => Some(PropertyKey::Trigger),
            LAST_REAUTH_NOTICE_KEY => Some(PropertyKey::LastReauthNotice),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key())
    }
}
