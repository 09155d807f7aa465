use crate::domain::model::SizingMode;
use crate::domain::records::Theme;
use crate::utils::error::Result;

/// Key-value backend the stores persist their JSON blobs into.
pub trait Storage: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn set(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn default_mode(&self) -> SizingMode;
    fn default_group_count(&self) -> usize;
    fn default_group_size(&self) -> usize;
    fn assign_leader(&self) -> bool;
    fn default_theme(&self) -> Theme;
    fn history_limit(&self) -> usize;
}
