//! In-memory character repository for development and testing
//!
//! Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepositoryError};
use crate::domain::entities::{Character, Item};
use crate::domain::value_objects::{CharacterId, CharacterPatch, ItemId};

#[derive(Clone, Default)]
pub struct InMemoryCharacterRepository {
    characters: Arc<RwLock<HashMap<CharacterId, Character>>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<T>(
        &self,
        id: CharacterId,
        change: impl FnOnce(&mut Character) -> T + Send,
    ) -> Result<T, RepositoryError> {
        let mut characters = self.characters.write().await;
        let character = characters
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        let result = change(character);
        character.updated_at = Utc::now();
        Ok(result)
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<(), RepositoryError> {
        self.characters
            .write()
            .await
            .insert(character.id, character.clone());
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError> {
        Ok(self.characters.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let mut characters: Vec<Character> =
            self.characters.read().await.values().cloned().collect();
        characters.sort_by_key(|c| c.created_at);
        Ok(characters)
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepositoryError> {
        Ok(self.characters.write().await.remove(&id).is_some())
    }

    async fn apply_patch(
        &self,
        id: CharacterId,
        patch: &CharacterPatch,
    ) -> Result<(), RepositoryError> {
        self.modify(id, |character| patch.apply(character)).await
    }

    async fn add_item(&self, id: CharacterId, item: &Item) -> Result<(), RepositoryError> {
        let item = item.clone();
        self.modify(id, move |character| character.add_item(item))
            .await
    }

    async fn remove_item(&self, id: CharacterId, item_id: ItemId) -> Result<bool, RepositoryError> {
        self.modify(id, |character| character.remove_item(item_id).is_some())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DieSize, SkillKey};

    #[tokio::test]
    async fn test_patch_leaves_other_fields_untouched() {
        let repo = InMemoryCharacterRepository::new();
        let character = Character::new("Anne Bonny", DieSize::D6);
        repo.create(&character).await.unwrap();

        // A stale view of the record only carries the fields it changed.
        let stale = character.clone().map_skill(SkillKey::Steel, |s| s.toggle_wound(false));
        let fresh = character.clone().map_condition(|c| c.toggle_stress(false));
        repo.apply_patch(character.id, &CharacterPatch::diff(&character, &fresh))
            .await
            .unwrap();
        repo.apply_patch(character.id, &CharacterPatch::diff(&character, &stale))
            .await
            .unwrap();

        let stored = repo.get(character.id).await.unwrap().unwrap();
        assert_eq!(stored.condition.stress, 1);
        assert_eq!(stored.skills[&SkillKey::Steel].wounds, 1);
    }

    #[tokio::test]
    async fn test_missing_character() {
        let repo = InMemoryCharacterRepository::new();
        let err = repo
            .add_item(CharacterId::new(), &Item::blank(crate::domain::entities::ItemType::Item))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert!(!repo.delete(CharacterId::new()).await.unwrap());
    }
}
