//! History store collaborator.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use kokoro_core::chat::GenerationMode;
use kokoro_core::error::CoreError;
use kokoro_core::history::HistoryRecord;
use kokoro_core::types::Timestamp;
use tokio::sync::RwLock;

/// Storage for completed generations.
///
/// Decouples the studio from where history lives. The shipped
/// implementation keeps everything in memory.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<HistoryRecord>, CoreError>;

    async fn record(&self, record: HistoryRecord) -> Result<(), CoreError>;

    /// Remove a record.
    ///
    /// # Returns
    ///
    /// - `Ok(HistoryRecord)`: the removed record
    /// - `Err(CoreError::NotFound)`: no record with that id
    async fn delete(&self, id: &str) -> Result<HistoryRecord, CoreError>;

    /// Replace a record's prompt (edit-and-regenerate). Blank prompts are
    /// rejected with [`CoreError::Validation`].
    async fn edit_prompt(&self, id: &str, prompt: &str) -> Result<HistoryRecord, CoreError>;
}

/// Process-local [`HistoryStore`].
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with two sample records (30 minutes and 2 hours old).
    pub fn with_demo_records() -> Self {
        let now = Utc::now();
        Self {
            records: RwLock::new(vec![
                demo_record(
                    "1",
                    "Change to school uniform, smiling face",
                    now - Duration::minutes(30),
                    GenerationMode::Variation,
                ),
                demo_record(
                    "2",
                    "Add cat ears, change background to classroom",
                    now - Duration::hours(2),
                    GenerationMode::Remix,
                ),
            ]),
        }
    }
}

fn demo_record(id: &str, prompt: &str, timestamp: Timestamp, mode: GenerationMode) -> HistoryRecord {
    HistoryRecord {
        id: id.to_string(),
        prompt: prompt.to_string(),
        original_image: "/placeholder.svg".to_string(),
        result_image: "/placeholder.svg".to_string(),
        timestamp,
        mode,
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn list(&self) -> Result<Vec<HistoryRecord>, CoreError> {
        let mut records = self.records.read().await.clone();
        // Later inserts win ties.
        records.reverse();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn record(&self, record: HistoryRecord) -> Result<(), CoreError> {
        tracing::debug!(record_id = %record.id, mode = ?record.mode, "Recording history");
        self.records.write().await.push(record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<HistoryRecord, CoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("HistoryRecord", id))?;
        Ok(records.remove(index))
    }

    async fn edit_prompt(&self, id: &str, prompt: &str) -> Result<HistoryRecord, CoreError> {
        let prompt = kokoro_core::chat::validate_prompt(prompt)?;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("HistoryRecord", id))?;
        record.prompt = prompt.to_string();
        Ok(record.clone())
    }
}
