//! Serialized form document: items with their versioned choice pools.

use serde::{Deserialize, Serialize};
use slotguard_application::ports::form_gateway::{FormError, PoolSnapshot, PoolWrite};
use slotguard_domain::{ChoicePool, FormItem, QuestionId, QuestionType};

/// One item of a [`FormDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocumentItem {
    pub id: QuestionId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Offered options; empty for items without a choice pool
    #[serde(default, skip_serializing_if = "ChoicePool::is_empty")]
    pub choices: ChoicePool,
    /// Bumped on every pool write
    #[serde(default)]
    pub version: u64,
}

/// A form as stored on disk or held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<FormDocumentItem>,
}

impl FormDocument {
    pub fn items(&self) -> Vec<FormItem> {
        self.items
            .iter()
            .map(|item| FormItem::new(item.id.clone(), item.title.clone(), item.question_type))
            .collect()
    }

    fn find(&self, id: &QuestionId, question_type: QuestionType) -> Result<usize, FormError> {
        if !question_type.is_supported() {
            return Err(FormError::UnsupportedType(question_type));
        }

        let index = self
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| FormError::QuestionNotFound(id.clone()))?;

        let actual = self.items[index].question_type;
        if actual != question_type {
            return Err(FormError::TypeMismatch {
                id: id.clone(),
                expected: question_type,
                actual,
            });
        }
        Ok(index)
    }

    pub fn pool(&self, id: &QuestionId, question_type: QuestionType) -> Result<PoolSnapshot, FormError> {
        let item = &self.items[self.find(id, question_type)?];
        Ok(PoolSnapshot {
            pool: item.choices.clone(),
            version: item.version,
        })
    }

    /// Replace a pool if its version still matches.
    pub fn replace_pool(
        &mut self,
        id: &QuestionId,
        question_type: QuestionType,
        expected_version: u64,
        pool: &ChoicePool,
    ) -> Result<PoolWrite, FormError> {
        let index = self.find(id, question_type)?;
        let item = &mut self.items[index];

        if item.version != expected_version {
            return Ok(PoolWrite::Conflict {
                current_version: item.version,
            });
        }

        item.choices = pool.clone();
        item.version += 1;
        Ok(PoolWrite::Written {
            version: item.version,
        })
    }
}
