//! Form gateway backed by a JSON form document on disk.

use super::document::FormDocument;
use crate::persist::{DocumentLock, atomic_write};
use async_trait::async_trait;
use slotguard_application::ports::form_gateway::{FormError, FormGateway, PoolSnapshot, PoolWrite};
use slotguard_domain::{ChoicePool, FormItem, QuestionId, QuestionType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and rewrites the form document at `path`.
///
/// A pool write holds the document lock from the version check through
/// the rename, so writes are compare-and-swap against each pool's version
/// across every gateway and process sharing the file.
pub struct JsonFileFormGateway {
    path: PathBuf,
}

impl JsonFileFormGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<FormDocument, FormError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| FormError::Io(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| FormError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, document: &FormDocument) -> Result<(), FormError> {
        let encoded = serde_json::to_vec_pretty(document)
            .map_err(|e| FormError::Unavailable(e.to_string()))?;
        atomic_write(&self.path, &encoded)
            .map_err(|e| FormError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl FormGateway for JsonFileFormGateway {
    async fn list_items(&self) -> Result<Vec<FormItem>, FormError> {
        Ok(self.load()?.items())
    }

    async fn get_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
    ) -> Result<PoolSnapshot, FormError> {
        self.load()?.pool(id, question_type)
    }

    async fn set_choice_pool(
        &self,
        id: &QuestionId,
        question_type: QuestionType,
        expected_version: u64,
        pool: &ChoicePool,
    ) -> Result<PoolWrite, FormError> {
        let _lock = DocumentLock::acquire(&self.path).await.map_err(|e| {
            FormError::Unavailable(format!("{}: could not lock: {}", self.path.display(), e))
        })?;
        let mut document = self.load()?;
        let write = document.replace_pool(id, question_type, expected_version, pool)?;
        if let PoolWrite::Written { version } = write {
            self.save(&document)?;
            debug!(question = %id, version, "Saved choice pool");
        }
        Ok(write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"{
        "title": "Workshop",
        "items": [
            { "id": "slot", "title": "Pick a slot", "type": "MULTIPLE_CHOICE",
              "choices": ["9am", "10am", "11am"] },
            { "id": "team", "title": "Teams", "type": "CHECKBOX",
              "choices": ["red", "blue"], "version": 4 }
        ]
    }"#;

    fn gateway() -> (tempfile::TempDir, JsonFileFormGateway) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, FORM).unwrap();
        (dir, JsonFileFormGateway::new(path))
    }

    #[tokio::test]
    async fn test_write_persists_and_bumps_version() {
        let (_dir, gateway) = gateway();
        let id = QuestionId::new("team");

        let snapshot = gateway.get_choice_pool(&id, QuestionType::Checkbox).await.unwrap();
        assert_eq!(snapshot.version, 4);

        let pool: ChoicePool = ["blue"].into_iter().collect();
        let write = gateway
            .set_choice_pool(&id, QuestionType::Checkbox, 4, &pool)
            .await
            .unwrap();
        assert_eq!(write, PoolWrite::Written { version: 5 });

        let reopened = JsonFileFormGateway::new(gateway.path());
        let snapshot = reopened.get_choice_pool(&id, QuestionType::Checkbox).await.unwrap();
        assert_eq!(snapshot.pool, pool);
        assert_eq!(snapshot.version, 5);
    }

    #[tokio::test]
    async fn test_stale_write_is_refused() {
        let (_dir, gateway) = gateway();
        let id = QuestionId::new("slot");
        let pool: ChoicePool = ["11am"].into_iter().collect();

        gateway
            .set_choice_pool(&id, QuestionType::MultipleChoice, 0, &pool)
            .await
            .unwrap();
        let second = gateway
            .set_choice_pool(&id, QuestionType::MultipleChoice, 0, &pool)
            .await
            .unwrap();
        assert_eq!(second, PoolWrite::Conflict { current_version: 1 });
    }

    #[test]
    fn test_gateways_on_separate_runtimes_lose_no_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        let slots: Vec<String> = (0..20).map(|i| format!("slot-{i:02}")).collect();
        let document = serde_json::json!({
            "title": "Workshop",
            "items": [{ "id": "slot", "title": "Pick a slot",
                        "type": "MULTIPLE_CHOICE", "choices": slots, "version": 7 }]
        });
        fs::write(&path, document.to_string()).unwrap();

        // One thread, runtime and gateway per respondent, as separate
        // invocations would have.
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let runtime = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .unwrap();
                    runtime.block_on(async move {
                        let gateway = JsonFileFormGateway::new(path);
                        let id = QuestionId::new("slot");
                        let claimed = format!("slot-{i:02}");
                        loop {
                            let snapshot = gateway
                                .get_choice_pool(&id, QuestionType::MultipleChoice)
                                .await
                                .unwrap();
                            let pool: ChoicePool = snapshot
                                .pool
                                .values()
                                .iter()
                                .filter(|v| **v != claimed)
                                .cloned()
                                .collect();
                            tokio::task::yield_now().await;
                            let write = gateway
                                .set_choice_pool(
                                    &id,
                                    QuestionType::MultipleChoice,
                                    snapshot.version,
                                    &pool,
                                )
                                .await
                                .unwrap();
                            if matches!(write, PoolWrite::Written { .. }) {
                                break;
                            }
                        }
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let snapshot = runtime
            .block_on(
                JsonFileFormGateway::new(&path)
                    .get_choice_pool(&QuestionId::new("slot"), QuestionType::MultipleChoice),
            )
            .unwrap();
        assert_eq!(
            snapshot.pool.values(),
            ["slot-16", "slot-17", "slot-18", "slot-19"]
        );
        assert_eq!(snapshot.version, 7 + 16);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileFormGateway::new(dir.path().join("absent.json"));
        assert!(matches!(gateway.list_items().await, Err(FormError::Io(_))));
    }
}
