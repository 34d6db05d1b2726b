//! Hand-written port fakes shared by the use case tests.

use crate::ports::form_gateway::{FormError, FormGateway, PoolSnapshot, PoolWrite};
use crate::ports::host::{AuthorizationPort, AuthorizationStatus, Clock, IdentityPort};
use crate::ports::notification::{NotificationError, NotificationSender};
use crate::ports::property_store::{PropertyStore, StoreError};
use crate::ports::submission_logger::{SubmissionLogEntry, SubmissionLogger};
use crate::ports::trigger::{TriggerError, TriggerRegistrar};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotguard_domain::{
    ChoicePool, Configuration, FormItem, QuestionId, QuestionType, TriggerAction,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

// ==================== Property Store ====================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.lock().unwrap();
            for (k, v) in entries {
                values.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.lock().unwrap().clone()
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read failure injected".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        Ok(self.value(key))
    }

    async fn get_properties(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.check_read()?;
        Ok(self.snapshot())
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_property(&self, key: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> Result<bool, StoreError> {
        self.check_write()?;
        let mut values = self.values.lock().unwrap();
        if values.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        match new {
            Some(value) => values.insert(key.to_string(), value.to_string()),
            None => values.remove(key),
        };
        Ok(true)
    }
}

// ==================== Form ====================

struct MockQuestion {
    item: FormItem,
    pool: ChoicePool,
    version: u64,
}

/// In-memory form with versioned pools.
///
/// `interleave` queues pools that a "concurrent respondent" writes right
/// after the next read of a question, forcing a version conflict. Reads
/// suspend before returning, and `gate_reads(n)` holds the first `n` reads
/// until all of them have taken their snapshot.
#[derive(Default)]
pub struct MockForm {
    questions: Mutex<Vec<MockQuestion>>,
    interleave: Mutex<VecDeque<(QuestionId, Vec<String>)>>,
    writes: Mutex<Vec<(QuestionId, Vec<String>)>>,
    read_gate: Mutex<Option<(Arc<Barrier>, usize)>>,
    fail_reads: AtomicBool,
}

impl MockForm {
    pub fn with_question(self, id: &str, question_type: QuestionType, pool: &[&str]) -> Self {
        self.questions.lock().unwrap().push(MockQuestion {
            item: FormItem::new(id, format!("Question {id}"), question_type),
            pool: pool.iter().copied().collect(),
            version: 1,
        });
        self
    }

    pub fn gate_reads(self, readers: usize) -> Self {
        *self.read_gate.lock().unwrap() = Some((Arc::new(Barrier::new(readers)), readers));
        self
    }

    fn next_read_gate(&self) -> Option<Arc<Barrier>> {
        let mut gate = self.read_gate.lock().unwrap();
        match gate.as_mut() {
            Some((barrier, remaining)) if *remaining > 0 => {
                *remaining -= 1;
                Some(barrier.clone())
            }
            _ => None,
        }
    }

    pub fn pool(&self, id: &str) -> Vec<String> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.item.id.as_str() == id)
            .map(|q| q.pool.values().to_vec())
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<(QuestionId, Vec<String>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn interleave_write(&self, id: &str, pool: &[&str]) {
        self.interleave.lock().unwrap().push_back((
            QuestionId::new(id),
            pool.iter().map(|v| v.to_string()).collect(),
        ));
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl FormGateway for MockForm {
    async fn list_items(&self) -> Result<Vec<FormItem>, FormError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.item.clone())
            .collect())
    }

    async fn get_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
    ) -> Result<PoolSnapshot, FormError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(FormError::Unavailable("read failure injected".to_string()));
        }

        let snapshot = {
            let mut questions = self.questions.lock().unwrap();
            let question = questions
                .iter_mut()
                .find(|q| &q.item.id == id)
                .ok_or_else(|| FormError::QuestionNotFound(id.clone()))?;
            if question.item.question_type != question_type {
                return Err(FormError::TypeMismatch {
                    id: id.clone(),
                    expected: question_type,
                    actual: question.item.question_type,
                });
            }

            let snapshot = PoolSnapshot {
                pool: question.pool.clone(),
                version: question.version,
            };

            let mut interleave = self.interleave.lock().unwrap();
            if interleave.front().is_some_and(|(qid, _)| qid == id)
                && let Some((_, pool)) = interleave.pop_front()
            {
                question.pool = ChoicePool::new(pool);
                question.version += 1;
            }
            snapshot
        };

        // Give concurrent submissions a chance to run between read and write
        match self.next_read_gate() {
            Some(barrier) => {
                barrier.wait().await;
            }
            None => tokio::task::yield_now().await,
        }

        Ok(snapshot)
    }

    async fn set_choice_pool(
        &self,
        id: &QuestionId,
        _question_type: QuestionType,
        expected_version: u64,
        pool: &ChoicePool,
    ) -> Result<PoolWrite, FormError> {
        let mut questions = self.questions.lock().unwrap();
        let question = questions
            .iter_mut()
            .find(|q| &q.item.id == id)
            .ok_or_else(|| FormError::QuestionNotFound(id.clone()))?;

        if question.version != expected_version {
            return Ok(PoolWrite::Conflict {
                current_version: question.version,
            });
        }

        question.pool = pool.clone();
        question.version += 1;
        self.writes
            .lock()
            .unwrap()
            .push((id.clone(), pool.values().to_vec()));
        Ok(PoolWrite::Written {
            version: question.version,
        })
    }
}

// ==================== Host ====================

pub struct FixedAuthorization(pub AuthorizationStatus);

#[async_trait]
impl AuthorizationPort for FixedAuthorization {
    async fn authorization_status(&self) -> AuthorizationStatus {
        self.0
    }
}

pub struct FixedIdentity(pub Mutex<String>);

impl FixedIdentity {
    pub fn new(email: &str) -> Self {
        Self(Mutex::new(email.to_string()))
    }

    pub fn switch_to(&self, email: &str) {
        *self.0.lock().unwrap() = email.to_string();
    }
}

impl IdentityPort for FixedIdentity {
    fn current_user_email(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}

pub struct ManualClock(pub Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

// ==================== Outbound ====================

#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<String>>,
    fail: AtomicBool,
    delay: Option<Duration>,
}

impl RecordingSender {
    /// Sender that takes `delay` to deliver, leaving room for other calls.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let sender = Self::default();
        sender.fail.store(true, Ordering::SeqCst);
        sender
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send_reauthorization_request(&self, recipient: &str) -> Result<(), NotificationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery("mail quota exceeded".to_string()));
        }
        self.sent.lock().unwrap().push(recipient.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingTrigger {
    pub calls: Mutex<Vec<(String, bool)>>,
}

impl RecordingTrigger {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TriggerRegistrar for RecordingTrigger {
    async fn adjust_form_submit_trigger(
        &self,
        owner: &str,
        configuration: &Configuration,
    ) -> Result<TriggerAction, TriggerError> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), configuration.any_enabled()));
        Ok(TriggerAction::Keep)
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub kinds: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.kinds.lock().unwrap().clone()
    }
}

impl SubmissionLogger for RecordingLogger {
    fn log(&self, entry: SubmissionLogEntry) {
        self.kinds.lock().unwrap().push(entry.kind);
    }
}
