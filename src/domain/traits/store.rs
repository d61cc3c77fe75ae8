use crate::application::errors::StorageError;
use crate::domain::entities::Fridge;
use async_trait::async_trait;

/// FridgeStore trait - abstraction for fridge persistence
///
/// Loading is deliberately fail-open: a missing or unreadable backing file
/// yields an empty fridge instead of an error, so a load problem is never
/// surfaced to the user. Saving replaces the entire persisted sequence and
/// a save failure is fatal to the request that triggered it.
#[async_trait]
pub trait FridgeStore: Send + Sync {
    async fn load(&self) -> Fridge;
    async fn save(&self, fridge: &Fridge) -> Result<(), StorageError>;
}
