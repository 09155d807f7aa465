use crate::core::Storage;
use crate::utils::error::{GroupError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed storage: every key is one JSON file under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GroupError::StorageError {
                key: key.to_string(),
                message: "Keys may only contain letters, digits, '_' and '-'".to_string(),
            });
        }
        Ok(Path::new(&self.base_path).join(format!("{}.json", key)))
    }
}

impl Storage for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.key_path(key)?;
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = self.key_path(key)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let full_path = self.key_path(key)?;
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
