use chrono::Utc;
use uuid::Uuid;

use super::{keys, load_or_default, save_json};
use crate::domain::ports::Storage;
use crate::domain::records::{HistoryRecord, NewHistoryEntry};
use crate::utils::error::{GroupError, Result};

/// Most recent sessions kept by default.
pub const HISTORY_LIMIT: usize = 50;

/// Newest-first log of completed grouping sessions.
#[derive(Debug, Clone)]
pub struct HistoryStore<S: Storage> {
    storage: S,
    limit: usize,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_limit(storage, HISTORY_LIMIT)
    }

    pub fn with_limit(storage: S, limit: usize) -> Self {
        Self {
            storage,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn load(&self) -> Vec<HistoryRecord> {
        load_or_default(&self.storage, keys::HISTORY, Vec::new()).await
    }

    /// Prepends a record and drops whatever falls past the limit.
    pub async fn add(&self, entry: NewHistoryEntry) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            title: entry.title,
            groups: entry.groups,
            participant_count: entry.participant_count,
            mode: entry.mode,
            group_count: entry.group_count,
            group_size: entry.group_size,
            theme: entry.theme,
            timestamp: Utc::now(),
        };

        let mut history = self.load().await;
        history.insert(0, record.clone());
        history.truncate(self.limit);
        save_json(&self.storage, keys::HISTORY, &history).await?;

        tracing::debug!(id = %record.id, entries = history.len(), "Added history entry");
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<HistoryRecord> {
        self.load()
            .await
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GroupError::not_found("History", id))
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<HistoryRecord>> {
        let mut history = self.load().await;
        let before = history.len();
        history.retain(|r| r.id != id);
        if history.len() == before {
            return Err(GroupError::not_found("History", id));
        }
        save_json(&self.storage, keys::HISTORY, &history).await?;
        Ok(history)
    }

    pub async fn clear(&self) -> Result<()> {
        save_json(&self.storage, keys::HISTORY, &Vec::<HistoryRecord>::new()).await
    }
}
