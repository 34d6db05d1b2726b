//! Choice pool depletion
//!
//! A [`ChoicePool`] is the ordered list of option values a question currently
//! offers. Depletion removes the values a respondent claimed. A pool is never
//! left empty: when the last option goes, the placeholder takes its place so
//! the question stays answerable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fallback option offered once every real option has been claimed.
pub const DEFAULT_BACKUP_TEXT: &str = "No options available";

/// Ordered sequence of textual options offered by one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoicePool(Vec<String>);

impl ChoicePool {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn into_values(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }
}

impl<S: Into<String>> FromIterator<S> for ChoicePool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Remove `removed` from `pool`, substituting [`DEFAULT_BACKUP_TEXT`] for an empty result.
pub fn deplete(pool: &ChoicePool, removed: &BTreeSet<String>) -> ChoicePool {
    deplete_with_placeholder(pool, removed, DEFAULT_BACKUP_TEXT)
}

/// Remove `removed` from `pool`, substituting `placeholder` for an empty result.
///
/// The relative order of surviving values is preserved.
pub fn deplete_with_placeholder(
    pool: &ChoicePool,
    removed: &BTreeSet<String>,
    placeholder: &str,
) -> ChoicePool {
    let remaining: Vec<String> = pool
        .values()
        .iter()
        .filter(|value| !removed.contains(*value))
        .cloned()
        .collect();

    if remaining.is_empty() {
        ChoicePool(vec![placeholder.to_string()])
    } else {
        ChoicePool(remaining)
    }
}

/// A planned depletion of one pool, with bookkeeping about what was claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depletion {
    before: ChoicePool,
    after: ChoicePool,
    /// Selected values that were no longer offered
    stale: Vec<String>,
}

impl Depletion {
    pub fn plan(pool: &ChoicePool, removed: &BTreeSet<String>, placeholder: &str) -> Self {
        let stale = removed
            .iter()
            .filter(|value| !pool.contains(value))
            .cloned()
            .collect();

        Self {
            before: pool.clone(),
            after: deplete_with_placeholder(pool, removed, placeholder),
            stale,
        }
    }

    pub fn before(&self) -> &ChoicePool {
        &self.before
    }

    pub fn after(&self) -> &ChoicePool {
        &self.after
    }

    pub fn stale(&self) -> &[String] {
        &self.stale
    }

    /// Whether writing the result would change the live pool.
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }
}
