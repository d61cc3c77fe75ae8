//! File-based storage implementation

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::errors::StorageError;
use crate::domain::entities::Fridge;
use crate::domain::traits::FridgeStore;

/// JSON flat-file store
///
/// The whole fridge lives in one file as a JSON array of items. There is
/// no locking and no atomic rename; a crash mid-write can corrupt the
/// file, in which case the next load silently starts from empty.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl FridgeStore for JsonFileStore {
    async fn load(&self) -> Fridge {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No readable fridge file at {:?}: {}", self.path, e);
                return Fridge::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(fridge) => fridge,
            Err(e) => {
                tracing::debug!("Unparseable fridge file at {:?}: {}", self.path, e);
                Fridge::new()
            }
        }
    }

    async fn save(&self, fridge: &Fridge) -> Result<(), StorageError> {
        let json = serde_json::to_string(fridge)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
