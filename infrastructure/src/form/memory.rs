//! In-memory form gateway.

use super::document::FormDocument;
use async_trait::async_trait;
use slotguard_application::ports::form_gateway::{FormError, FormGateway, PoolSnapshot, PoolWrite};
use slotguard_domain::{ChoicePool, FormItem, QuestionId, QuestionType};
use std::sync::Mutex;

/// Form held in process memory.
pub struct InMemoryFormGateway {
    document: Mutex<FormDocument>,
}

impl InMemoryFormGateway {
    pub fn new(document: FormDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    /// Copy of the current document
    pub fn document(&self) -> Result<FormDocument, FormError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FormDocument>, FormError> {
        self.document
            .lock()
            .map_err(|_| FormError::Unavailable("form lock poisoned".to_string()))
    }
}

#[async_trait]
impl FormGateway for InMemoryFormGateway {
    async fn list_items(&self) -> Result<Vec<FormItem>, FormError> {
        Ok(self.lock()?.items())
    }

    async fn get_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
    ) -> Result<PoolSnapshot, FormError> {
        self.lock()?.pool(id, question_type)
    }

    async fn set_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
        expected_version: u64,
        pool: &ChoicePool,
    ) -> Result<PoolWrite, FormError> {
        self.lock()?
            .replace_pool(id, question_type, expected_version, pool)
    }
}
