//! Platform adapters

pub mod console;
pub mod line;
