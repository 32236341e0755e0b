//! Character Service - Application service for character management
//!
//! Creating, listing and deleting characters, building their sheet, and
//! managing the items they carry.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::ServiceError;
use crate::application::dto::CharacterSheetView;
use crate::application::ports::outbound::{CharacterRepositoryPort, LocalizationPort};
use crate::domain::entities::{Character, Item, ItemType, Skill};
use crate::domain::value_objects::{CharacterId, DiceFormula, DieSize, ItemId, SkillKey};

const MAX_NAME_LENGTH: usize = 255;

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub starting_die: DieSize,
    /// Baseline die per skill, overriding `starting_die`
    pub skill_max: BTreeMap<SkillKey, DieSize>,
}

/// Request to add an item to a character
#[derive(Debug, Clone)]
pub struct CreateItemRequest {
    pub item_type: ItemType,
    /// Defaults to "New <Type>"
    pub name: Option<String>,
    pub spell_level: Option<u8>,
    pub formula: Option<String>,
}

impl CreateItemRequest {
    pub fn of_type(item_type: ItemType) -> Self {
        Self {
            item_type,
            name: None,
            spell_level: None,
            formula: None,
        }
    }
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create a new character with all six skills
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<Character, ServiceError>;

    /// Get a character by ID
    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, ServiceError>;

    /// List all characters
    async fn list_characters(&self) -> Result<Vec<Character>, ServiceError>;

    /// Delete a character
    async fn delete_character(&self, id: CharacterId) -> Result<(), ServiceError>;

    /// Build the sheet projection for a character
    async fn get_sheet(&self, id: CharacterId) -> Result<CharacterSheetView, ServiceError>;

    /// Give a character a new item
    async fn create_item(
        &self,
        id: CharacterId,
        request: CreateItemRequest,
    ) -> Result<Item, ServiceError>;

    /// Take an item away from a character
    async fn delete_item(&self, id: CharacterId, item_id: ItemId) -> Result<(), ServiceError>;
}

/// Default implementation of CharacterService over the repository port
pub struct CharacterServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
    localization: Arc<dyn LocalizationPort>,
}

impl CharacterServiceImpl {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        localization: Arc<dyn LocalizationPort>,
    ) -> Self {
        Self {
            repository,
            localization,
        }
    }

    /// Validate a character creation request
    fn validate_create_request(request: &CreateCharacterRequest) -> Result<(), ServiceError> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Character name cannot be empty".to_string(),
            ));
        }
        if request.name.len() > MAX_NAME_LENGTH {
            return Err(ServiceError::Validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    fn validate_item_request(request: &CreateItemRequest) -> Result<(), ServiceError> {
        if let Some(ref name) = request.name {
            if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
                return Err(ServiceError::Validation(format!(
                    "Item name must be 1 to {} characters",
                    MAX_NAME_LENGTH
                )));
            }
        }
        if request.spell_level.is_some() && request.item_type != ItemType::Spell {
            return Err(ServiceError::Validation(
                "Only spells have a spell level".to_string(),
            ));
        }
        if let Some(ref formula) = request.formula {
            DiceFormula::parse(formula)?;
        }
        Ok(())
    }

    async fn load(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(ServiceError::CharacterNotFound(id))
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<Character, ServiceError> {
        Self::validate_create_request(&request)?;

        let mut character = Character::new(request.name.trim(), request.starting_die);
        for (key, max) in request.skill_max {
            character = character.with_skill(key, Skill::new(max));
        }

        self.repository.create(&character).await?;

        info!(character_id = %character.id, "Created character: {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, ServiceError> {
        debug!(character_id = %id, "Fetching character");
        Ok(self.repository.get(id).await?)
    }

    #[instrument(skip(self))]
    async fn list_characters(&self) -> Result<Vec<Character>, ServiceError> {
        debug!("Listing characters");
        Ok(self.repository.list().await?)
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, id: CharacterId) -> Result<(), ServiceError> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::CharacterNotFound(id));
        }
        info!(character_id = %id, "Deleted character");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_sheet(&self, id: CharacterId) -> Result<CharacterSheetView, ServiceError> {
        let character = self.load(id).await?;
        Ok(CharacterSheetView::build(&character, self.localization.as_ref()))
    }

    #[instrument(skip(self, request), fields(item_type = request.item_type.as_str()))]
    async fn create_item(
        &self,
        id: CharacterId,
        request: CreateItemRequest,
    ) -> Result<Item, ServiceError> {
        Self::validate_item_request(&request)?;

        let mut item = match request.name {
            Some(name) => Item::new(name.trim(), request.item_type),
            None => Item::blank(request.item_type),
        };
        if let Some(level) = request.spell_level {
            item = item.with_spell_level(level);
        }
        if let Some(formula) = request.formula {
            item = item.with_formula(formula);
        }

        self.repository.add_item(id, &item).await?;

        info!(character_id = %id, item_id = %item.id, "Created item: {}", item.name);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: CharacterId, item_id: ItemId) -> Result<(), ServiceError> {
        if !self.repository.remove_item(id, item_id).await? {
            return Err(ServiceError::ItemNotFound(item_id));
        }
        info!(character_id = %id, item_id = %item_id, "Deleted item");
        Ok(())
    }
}
