//! Roll Service - Decides which formula a roll uses and hands it off
//!
//! The engine never rolls anything itself. A skill roll is one die of the
//! skill's current size; an item roll uses the item's own formula.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::ServiceError;
use crate::application::dto::skill_label;
use crate::application::ports::outbound::{
    CharacterRepositoryPort, LocalizationPort, RollEvaluatorPort, RollOutcome, RollRequest,
};
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterId, DiceFormula, ItemId, SkillKey};

#[async_trait]
pub trait RollService: Send + Sync {
    /// Roll one die of the skill's current size
    async fn roll_skill(&self, id: CharacterId, skill: SkillKey)
        -> Result<RollOutcome, ServiceError>;

    /// Roll an item's formula
    async fn roll_item(&self, id: CharacterId, item_id: ItemId)
        -> Result<RollOutcome, ServiceError>;
}

pub struct RollServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
    roller: Arc<dyn RollEvaluatorPort>,
    localization: Arc<dyn LocalizationPort>,
}

impl RollServiceImpl {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        roller: Arc<dyn RollEvaluatorPort>,
        localization: Arc<dyn LocalizationPort>,
    ) -> Self {
        Self {
            repository,
            roller,
            localization,
        }
    }

    async fn load(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(ServiceError::CharacterNotFound(id))
    }

    /// The request a skill roll would make right now
    pub fn skill_roll_request(
        &self,
        character: &Character,
        skill: SkillKey,
    ) -> Result<RollRequest, ServiceError> {
        let current = character.skill(skill).ok_or(ServiceError::SkillNotFound {
            character_id: character.id,
            skill,
        })?;
        let label = skill_label(skill, self.localization.as_ref());
        Ok(RollRequest::new(DiceFormula::single(current.value))
            .with_label(format!("[ability] {}", label)))
    }
}

#[async_trait]
impl RollService for RollServiceImpl {
    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn roll_skill(
        &self,
        id: CharacterId,
        skill: SkillKey,
    ) -> Result<RollOutcome, ServiceError> {
        let character = self.load(id).await?;
        let request = self.skill_roll_request(&character, skill)?;
        let outcome = self.roller.evaluate(request).await?;
        info!(formula = %outcome.formula, total = outcome.total, "Skill rolled");
        Ok(outcome)
    }

    #[instrument(skip(self), fields(character_id = %id, item_id = %item_id))]
    async fn roll_item(
        &self,
        id: CharacterId,
        item_id: ItemId,
    ) -> Result<RollOutcome, ServiceError> {
        let character = self.load(id).await?;
        let item = character
            .item(item_id)
            .ok_or(ServiceError::ItemNotFound(item_id))?;
        let formula = item
            .formula
            .as_deref()
            .ok_or(ServiceError::ItemNotRollable(item_id))?;

        let request = RollRequest::new(DiceFormula::parse(formula)?).with_label(item.name.clone());
        let outcome = self.roller.evaluate(request).await?;
        info!(formula = %outcome.formula, total = outcome.total, "Item rolled");
        Ok(outcome)
    }
}
