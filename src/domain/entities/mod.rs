//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod item;
pub mod message;

pub use command::FridgeCommand;
pub use item::{Fridge, Item};
pub use message::Message;
