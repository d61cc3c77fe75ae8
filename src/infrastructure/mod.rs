//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Data persistence
//! - Adapters: Platform integrations (LINE, console)
//! - Http: Webhook server

pub mod adapters;
pub mod config;
pub mod http;
pub mod storage;
