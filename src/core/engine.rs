use rand::Rng;

use crate::core::session::GroupingSession;
use crate::core::Storage;
use crate::domain::model::GroupPartition;
use crate::domain::records::HistoryRecord;
use crate::store::{HistoryStore, PreferencesStore};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    pub groups: GroupPartition,
    /// `None` when history recording was turned off.
    pub record: Option<HistoryRecord>,
}

/// Runs the "create groups" action: partition, then hand the result to the
/// history and preference stores.
pub struct GroupingEngine<S: Storage + Clone> {
    history: HistoryStore<S>,
    preferences: PreferencesStore<S>,
    record_history: bool,
}

impl<S: Storage + Clone> GroupingEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            history: HistoryStore::new(storage.clone()),
            preferences: PreferencesStore::new(storage),
            record_history: true,
        }
    }

    pub fn with_history(history: HistoryStore<S>, preferences: PreferencesStore<S>) -> Self {
        Self {
            history,
            preferences,
            record_history: true,
        }
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn preferences(&self) -> &PreferencesStore<S> {
        &self.preferences
    }

    /// Returns `Ok(None)` without touching storage when the session has no
    /// participants.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        session: &GroupingSession,
        rng: &mut R,
    ) -> Result<Option<GroupingOutcome>> {
        tracing::info!(
            "Creating groups for {} participants ({} mode)",
            session.participants().len(),
            session.mode()
        );

        let Some(groups) = session.create_groups(rng)? else {
            tracing::warn!("No participants entered; nothing to group");
            return Ok(None);
        };

        tracing::info!(
            "Created {} groups, sizes {:?}",
            groups.len(),
            groups.sizes()
        );

        let record = if self.record_history {
            let record = self.history.add(session.history_entry(&groups)).await?;
            tracing::debug!("Recorded session {} in history", record.id);
            Some(record)
        } else {
            None
        };

        if let Err(e) = self.preferences.set_last_used(&session.last_used()).await {
            tracing::warn!("Could not remember last used settings: {}", e);
        }

        Ok(Some(GroupingOutcome { groups, record }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_run_records_history_and_last_used() {
        let engine = GroupingEngine::new(MemoryStorage::new());
        let mut session = GroupingSession::new();
        session.set_title("Workshop");
        session.set_participant_text("Ann\nBen\nCal\nDee\nEli");
        session.set_group_count(2);

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = engine.run(&session, &mut rng).await.unwrap().unwrap();

        assert_eq!(outcome.groups.len(), 2);
        let record = outcome.record.unwrap();
        assert_eq!(record.title, "Workshop");
        assert_eq!(record.participant_count, 5);
        assert_eq!(record.group_size, 3);

        assert_eq!(engine.history().load().await.len(), 1);
        assert_eq!(
            engine.preferences().last_used().await.unwrap().group_count,
            2
        );
    }

    #[tokio::test]
    async fn test_run_without_participants_is_a_no_op() {
        let storage = MemoryStorage::new();
        let engine = GroupingEngine::new(storage.clone());
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = engine.run(&GroupingSession::new(), &mut rng).await.unwrap();
        assert!(outcome.is_none());
        assert!(storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_history_can_be_disabled() {
        let engine = GroupingEngine::new(MemoryStorage::new()).record_history(false);
        let mut session = GroupingSession::new();
        session.set_participant_text("a,b");

        let mut rng = StdRng::seed_from_u64(8);
        let outcome = engine.run(&session, &mut rng).await.unwrap().unwrap();
        assert!(outcome.record.is_none());
        assert!(engine.history().load().await.is_empty());
    }
}
