//! Persistence adapters
//!
//! SQLite for real use, an in-memory map for development and tests. Both
//! merge changed-field patches into the stored record.

mod character_repository;
mod memory_repository;

pub use character_repository::SqliteCharacterRepository;
pub use memory_repository::InMemoryCharacterRepository;
