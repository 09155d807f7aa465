use super::{keys, load_or_default, save_json};
use crate::domain::ports::Storage;
use crate::domain::records::{LastUsedSettings, Theme};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct PreferencesStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferencesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn dark_mode(&self) -> bool {
        load_or_default(&self.storage, keys::DARK_MODE, false).await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        save_json(&self.storage, keys::DARK_MODE, &enabled).await
    }

    pub async fn theme(&self) -> Theme {
        load_or_default(&self.storage, keys::SELECTED_THEME, Theme::default()).await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        save_json(&self.storage, keys::SELECTED_THEME, &theme).await
    }

    pub async fn last_used(&self) -> Option<LastUsedSettings> {
        load_or_default(&self.storage, keys::LAST_USED, None).await
    }

    pub async fn set_last_used(&self, settings: &LastUsedSettings) -> Result<()> {
        save_json(&self.storage, keys::LAST_USED, settings).await
    }

    pub async fn clear(&self) -> Result<()> {
        for key in [keys::DARK_MODE, keys::SELECTED_THEME, keys::LAST_USED] {
            self.storage.remove(key).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SizingMode;
    use crate::domain::ports::Storage;
    use crate::store::MemoryStorage;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let prefs = PreferencesStore::new(MemoryStorage::new());
        assert!(!prefs.dark_mode().await);
        assert_eq!(prefs.theme().await, Theme::Blue);
        assert!(prefs.last_used().await.is_none());
    }

    #[tokio::test]
    async fn test_set_and_clear() {
        let storage = MemoryStorage::new();
        let prefs = PreferencesStore::new(storage.clone());

        prefs.set_dark_mode(true).await.unwrap();
        prefs.set_theme(Theme::Indigo).await.unwrap();
        let last = LastUsedSettings {
            mode: SizingMode::ByGroupSize,
            group_count: 2,
            group_size: 5,
            assign_leader: false,
        };
        prefs.set_last_used(&last).await.unwrap();

        assert!(prefs.dark_mode().await);
        assert_eq!(prefs.theme().await, Theme::Indigo);
        assert_eq!(prefs.last_used().await, Some(last));
        assert_eq!(
            storage.get(keys::SELECTED_THEME).await.unwrap(),
            Some(b"\"indigo\"".to_vec())
        );

        prefs.clear().await.unwrap();
        assert!(storage.keys().await.is_empty());
        assert_eq!(prefs.theme().await, Theme::Blue);
    }

    #[tokio::test]
    async fn test_unknown_theme_falls_back_to_blue() {
        let storage = MemoryStorage::new();
        storage.set(keys::SELECTED_THEME, b"\"pink\"").await.unwrap();

        let prefs = PreferencesStore::new(storage);
        assert_eq!(prefs.theme().await, Theme::Blue);
    }
}
