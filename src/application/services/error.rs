//! Errors surfaced by the application services

use crate::application::ports::outbound::{RepositoryError, RollError};
use crate::domain::value_objects::{CharacterId, DiceParseError, ItemId, SkillKey};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Character {character_id} has no {skill} skill")]
    SkillNotFound {
        character_id: CharacterId,
        skill: SkillKey,
    },

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item has no roll formula: {0}")]
    ItemNotRollable(ItemId),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid dice formula: {0}")]
    InvalidFormula(#[from] DiceParseError),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error(transparent)]
    Roll(#[from] RollError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ServiceError::CharacterNotFound(id),
            other => ServiceError::Repository(other),
        }
    }
}
