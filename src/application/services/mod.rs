//! Application services - Business logic orchestration

pub mod fridge_service;

pub use fridge_service::FridgeService;
