//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Item, Fridge, FridgeCommand, Message)
//! - Traits: Abstractions for infrastructure (Bot, FridgeStore)

pub mod entities;
pub mod traits;
