//! Per-question settings and the configuration mapping built from them

use crate::question::entities::QuestionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Settings record stored for one gated question.
///
/// Fields this crate does not know about are kept verbatim so that a
/// toggle never drops settings written by a newer version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionSettings {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            extra: Map::new(),
        }
    }

    /// Decode a stored record.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Encode for storage.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A stored settings entry that could not be decoded.
///
/// Isolated to its own key; the rest of the configuration still loads.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Configuration entry {key} could not be decoded: {message}")]
pub struct ConfigurationDecodeError {
    pub key: String,
    pub message: String,
}

/// Mapping from question id to its settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<QuestionId, QuestionSettings>);

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: QuestionId, settings: QuestionSettings) {
        self.0.insert(id, settings);
    }

    pub fn get(&self, id: &QuestionId) -> Option<&QuestionSettings> {
        self.0.get(id)
    }

    /// Whether depletion applies to this question.
    pub fn is_enabled(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(|settings| settings.enabled)
    }

    /// Whether any question is gated.
    pub fn any_enabled(&self) -> bool {
        self.0.values().any(|settings| settings.enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &QuestionSettings)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(QuestionId, QuestionSettings)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (QuestionId, QuestionSettings)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
