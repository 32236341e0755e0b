//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory character storage
//! - HTTP: REST API routes
//! - Dice roller: random roll evaluator
//! - Localization: static label table
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod dice_roller;
pub mod http;
pub mod localization;
pub mod persistence;
pub mod state;
