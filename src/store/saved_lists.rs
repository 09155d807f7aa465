use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use super::{keys, load_or_default, save_json};
use crate::core::parser::{join_names, parse_participants, shuffle_names};
use crate::domain::ports::Storage;
use crate::domain::records::{NewSavedList, SavedList};
use crate::utils::error::{GroupError, Result};

#[derive(Debug, Clone)]
pub struct SavedListStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SavedListStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Vec<SavedList> {
        load_or_default(&self.storage, keys::SAVED_LISTS, Vec::new()).await
    }

    /// Stores a list at the front. Without a name the title is used, then
    /// `List {n}`.
    pub async fn save(&self, list: NewSavedList) -> Result<SavedList> {
        let mut lists = self.load().await;

        let name = list
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(list.title.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| format!("List {}", lists.len() + 1));

        let saved = SavedList {
            id: Uuid::new_v4().to_string(),
            name,
            count: parse_participants(&list.participant_text).len(),
            title: list.title,
            participant_text: list.participant_text,
            timestamp: Utc::now(),
        };

        lists.insert(0, saved.clone());
        save_json(&self.storage, keys::SAVED_LISTS, &lists).await?;

        tracing::debug!(id = %saved.id, count = saved.count, "Saved participant list");
        Ok(saved)
    }

    pub async fn get(&self, id: &str) -> Result<SavedList> {
        self.load()
            .await
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| GroupError::not_found("Saved list", id))
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<SavedList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroupError::invalid_argument("list name cannot be empty"));
        }

        let mut lists = self.load().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| GroupError::not_found("Saved list", id))?;
        list.name = name.to_string();
        let renamed = list.clone();

        save_json(&self.storage, keys::SAVED_LISTS, &lists).await?;
        Ok(renamed)
    }

    /// Rewrites the list's names in random order, one per line.
    pub async fn shuffle<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Result<SavedList> {
        let mut lists = self.load().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| GroupError::not_found("Saved list", id))?;

        let names = shuffle_names(&parse_participants(&list.participant_text), rng);
        list.participant_text = join_names(&names);
        list.count = names.len();
        let shuffled = list.clone();

        save_json(&self.storage, keys::SAVED_LISTS, &lists).await?;
        Ok(shuffled)
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<SavedList>> {
        let mut lists = self.load().await;
        let before = lists.len();
        lists.retain(|l| l.id != id);
        if lists.len() == before {
            return Err(GroupError::not_found("Saved list", id));
        }
        save_json(&self.storage, keys::SAVED_LISTS, &lists).await?;
        Ok(lists)
    }

    pub async fn search(&self, term: &str) -> Vec<SavedList> {
        filter_lists(self.load().await, term)
    }
}

/// Case-insensitive substring match on name or title. A blank term matches all.
pub fn filter_lists(lists: Vec<SavedList>, term: &str) -> Vec<SavedList> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return lists;
    }

    lists
        .into_iter()
        .filter(|l| {
            l.name.to_lowercase().contains(&needle) || l.title.to_lowercase().contains(&needle)
        })
        .collect()
}
