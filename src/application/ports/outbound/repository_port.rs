//! Repository port - Interface for character persistence
//!
//! Transitions never send whole records. They send the minimal
//! `CharacterPatch`, and the adapter merges it into whatever it has stored.

use async_trait::async_trait;

use crate::domain::entities::{Character, Item};
use crate::domain::value_objects::{CharacterId, CharacterPatch, ItemId};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Repository port for Character records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Store a new character
    async fn create(&self, character: &Character) -> Result<(), RepositoryError>;

    /// Get a character by ID
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError>;

    /// List all characters, oldest first
    async fn list(&self) -> Result<Vec<Character>, RepositoryError>;

    /// Delete a character. Returns false if it did not exist.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepositoryError>;

    /// Merge a changed-field patch into the stored character
    async fn apply_patch(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<(), RepositoryError>;

    /// Append an item to a character's possessions
    async fn add_item(&self, id: CharacterId, item: &Item) -> Result<(), RepositoryError>;

    /// Remove an item. Returns false if the character did not own it.
    async fn remove_item(&self, id: CharacterId, item_id: ItemId) -> Result<bool, RepositoryError>;
}
