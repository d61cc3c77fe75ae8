//! Fridge command handling
//!
//! Each handling cycle loads the full fridge, mutates it in memory and
//! overwrites the file with the full set. Malformed input degrades to a
//! fixed usage reply with no state change; only a failed save propagates.

use crate::application::errors::{CommandError, StorageError};
use crate::application::messaging::parser;
use crate::domain::entities::{FridgeCommand, Item};
use crate::domain::traits::FridgeStore;

const EMPTY_REPLY: &str = "The fridge is empty!";
const ADD_USAGE: &str = "Invalid format! Usage: add <name> <quantity> <expiry>";
const DELETE_USAGE: &str = "Invalid format! Usage: delete <name>";
const HELP_REPLY: &str = "Commands:\nadd <name> <quantity> <expiry>\nlist\ndelete <name>";

/// Service handling the fridge command surface
pub struct FridgeService<S: FridgeStore> {
    store: S,
}

impl<S: FridgeStore> FridgeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one line of inbound text and produce exactly one reply.
    pub async fn handle(&self, text: &str) -> Result<String, StorageError> {
        match parser::parse(text.trim()) {
            Ok(FridgeCommand::Add {
                name,
                quantity,
                expiry,
            }) => self.add(Item::new(name, quantity, expiry)).await,
            Ok(FridgeCommand::List) => Ok(self.list().await),
            Ok(FridgeCommand::Delete { name }) => self.delete(&name).await,
            Ok(FridgeCommand::Help) => Ok(HELP_REPLY.to_string()),
            Err(e) => {
                tracing::debug!("Malformed command: {}", e);
                Ok(usage_reply(&e).to_string())
            }
        }
    }

    async fn add(&self, item: Item) -> Result<String, StorageError> {
        let mut fridge = self.store.load().await;
        let reply = format!(
            "Added {} {}, expires {}",
            item.name, item.quantity, item.expiry
        );
        fridge.add(item);
        self.store.save(&fridge).await?;
        Ok(reply)
    }

    async fn list(&self) -> String {
        let fridge = self.store.load().await;
        if fridge.is_empty() {
            return EMPTY_REPLY.to_string();
        }
        fridge
            .items()
            .iter()
            .map(Item::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn delete(&self, name: &str) -> Result<String, StorageError> {
        let mut fridge = self.store.load().await;
        let removed = fridge.remove_all(name);
        self.store.save(&fridge).await?;
        // Reported as deleted whether or not anything matched; the
        // protocol has no existence check.
        tracing::debug!("Deleted {} item(s) named {:?}", removed, name);
        Ok(format!("Deleted {}", name))
    }
}

fn usage_reply(error: &CommandError) -> &'static str {
    match error {
        CommandError::AddUsage { .. } => ADD_USAGE,
        CommandError::DeleteUsage { .. } => DELETE_USAGE,
    }
}
