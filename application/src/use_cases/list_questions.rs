//! List Questions use case
//!
//! Enumerates the questions on the live form that can be gated.

use crate::ports::form_gateway::{FormError, FormGateway};
use slotguard_domain::SupportedQuestion;
use std::sync::Arc;
use tracing::debug;

pub struct ListQuestionsUseCase<F: FormGateway + 'static> {
    form: Arc<F>,
}

impl<F: FormGateway + 'static> ListQuestionsUseCase<F> {
    pub fn new(form: Arc<F>) -> Self {
        Self { form }
    }

    /// MultipleChoice, List and Checkbox questions, in form order.
    pub async fn execute(&self) -> Result<Vec<SupportedQuestion>, FormError> {
        let items = self.form.list_items().await?;
        let total = items.len();
        let questions: Vec<_> = items.iter().filter_map(SupportedQuestion::from_item).collect();
        debug!("{} of {} form items support gating", questions.len(), total);
        Ok(questions)
    }
}
