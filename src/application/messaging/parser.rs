//! Command parser - Parses inbound text into a `FridgeCommand`
//!
//! Dispatch is prefix/equality based and evaluated in a fixed order:
//! `add` prefix, `list` equality, `delete` prefix, help fallback. A wrong
//! argument count is a `CommandError`, not a fallback to help, so the
//! caller can answer with the matching usage string without mutating state.

use crate::application::errors::CommandError;
use crate::domain::entities::FridgeCommand;

pub const ADD_KEYWORD: &str = "add";
pub const LIST_KEYWORD: &str = "list";
pub const DELETE_KEYWORD: &str = "delete";

/// Parse one line of (already trimmed) text.
pub fn parse(text: &str) -> Result<FridgeCommand, CommandError> {
    if text.starts_with(ADD_KEYWORD) {
        parse_add(text)
    } else if text == LIST_KEYWORD {
        Ok(FridgeCommand::List)
    } else if text.starts_with(DELETE_KEYWORD) {
        parse_delete(text)
    } else {
        Ok(FridgeCommand::Help)
    }
}

/// `add <name> <quantity> <expiry>` - exactly four whitespace tokens.
fn parse_add(text: &str) -> Result<FridgeCommand, CommandError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(CommandError::AddUsage {
            got: tokens.len() - 1,
        });
    }
    Ok(FridgeCommand::Add {
        name: tokens[1].to_string(),
        quantity: tokens[2].to_string(),
        expiry: tokens[3].to_string(),
    })
}

/// `delete <name>` - exactly two whitespace tokens.
fn parse_delete(text: &str) -> Result<FridgeCommand, CommandError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(CommandError::DeleteUsage {
            got: tokens.len() - 1,
        });
    }
    Ok(FridgeCommand::Delete {
        name: tokens[1].to_string(),
    })
}
