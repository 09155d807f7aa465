//! Persistence collaborators. Each store owns a handle to the injected
//! [`Storage`] backend and keeps one JSON blob per key.
//!
//! Loading never fails: a missing key, a backend error or undecodable JSON all
//! fall back to the default value with a warning. Saving propagates errors.

pub mod history;
pub mod memory;
pub mod preferences;
pub mod saved_lists;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::ports::Storage;
use crate::utils::error::Result;

pub use history::{HistoryStore, HISTORY_LIMIT};
pub use memory::MemoryStorage;
pub use preferences::PreferencesStore;
pub use saved_lists::SavedListStore;

pub mod keys {
    pub const DARK_MODE: &str = "groupRandomizer_darkMode";
    pub const SELECTED_THEME: &str = "groupRandomizer_selectedTheme";
    pub const HISTORY: &str = "groupRandomizer_history";
    pub const SAVED_LISTS: &str = "groupRandomizer_savedLists";
    pub const LAST_USED: &str = "groupRandomizer_lastUsed";
}

pub(crate) async fn load_or_default<S, T>(storage: &S, key: &str, default: T) -> T
where
    S: Storage,
    T: DeserializeOwned,
{
    match storage.get(key).await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored value for '{}' is unreadable, using default: {}", key, e);
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("Error loading '{}' from storage, using default: {}", key, e);
            default
        }
    }
}

pub(crate) async fn save_json<S, T>(storage: &S, key: &str, value: &T) -> Result<()>
where
    S: Storage,
    T: Serialize + ?Sized,
{
    let data = serde_json::to_vec(value)?;
    storage.set(key, &data).await?;
    tracing::debug!("Saved {} bytes under '{}'", data.len(), key);
    Ok(())
}
