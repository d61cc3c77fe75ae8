//! Message handling - Turns inbound text into fridge commands

pub mod parser;
