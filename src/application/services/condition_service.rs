//! Condition Service - Wounds, scars, die degradation, stress and drink
//!
//! Every use case follows the same shape: load the character, compute the
//! next record with a pure domain transition, diff the two, and hand only the
//! changed fields to persistence. Nothing is written when the transition was
//! a no-op, and a failed write is reported, never retried.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

use super::ServiceError;
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::domain::entities::{Character, ScarSlot, Skill, SCAR_TRACK};
use crate::domain::value_objects::{CharacterId, CharacterPatch, DieSize, SkillKey};

#[async_trait]
pub trait ConditionService: Send + Sync {
    /// Click on a wound box; `marked` is whether that box was already marked
    async fn toggle_wound(
        &self,
        id: CharacterId,
        skill: SkillKey,
        marked: bool,
    ) -> Result<Character, ServiceError>;

    /// Click on box `slot` of a skill's scar track
    async fn toggle_scar(
        &self,
        id: CharacterId,
        skill: SkillKey,
        slot: usize,
    ) -> Result<Character, ServiceError>;

    /// Scar transition with the box state supplied by the caller
    async fn toggle_scar_state(
        &self,
        id: CharacterId,
        skill: SkillKey,
        state: ScarSlot,
    ) -> Result<Character, ServiceError>;

    async fn reduce_die(&self, id: CharacterId, skill: SkillKey)
        -> Result<Character, ServiceError>;

    async fn augment_die(
        &self,
        id: CharacterId,
        skill: SkillKey,
    ) -> Result<Character, ServiceError>;

    /// Change the die a skill recovers to
    async fn set_skill_max(
        &self,
        id: CharacterId,
        skill: SkillKey,
        max: DieSize,
    ) -> Result<Character, ServiceError>;

    /// Restore every unwounded skill to its baseline die
    async fn restore_skills(&self, id: CharacterId) -> Result<Character, ServiceError>;

    async fn toggle_stress(&self, id: CharacterId, active: bool)
        -> Result<Character, ServiceError>;

    async fn drink(&self, id: CharacterId) -> Result<Character, ServiceError>;

    async fn rest(&self, id: CharacterId) -> Result<Character, ServiceError>;

    async fn toggle_editing_skills(&self, id: CharacterId) -> Result<Character, ServiceError>;
}

pub struct ConditionServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
}

impl ConditionServiceImpl {
    pub fn new(repository: Arc<dyn CharacterRepositoryPort>) -> Self {
        Self { repository }
    }

    async fn load(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(ServiceError::CharacterNotFound(id))
    }

    fn require_skill(character: &Character, skill: SkillKey) -> Result<Skill, ServiceError> {
        character
            .skill(skill)
            .copied()
            .ok_or(ServiceError::SkillNotFound {
                character_id: character.id,
                skill,
            })
    }

    /// Load, transform, persist the diff
    async fn transition<F>(
        &self,
        id: CharacterId,
        operation: &'static str,
        next: F,
    ) -> Result<Character, ServiceError>
    where
        F: FnOnce(Character) -> Result<Character, ServiceError> + Send,
    {
        let before = self.load(id).await?;
        let mut after = next(before.clone())?;

        let patch = CharacterPatch::diff(&before, &after);
        if patch.is_empty() {
            debug!(character_id = %id, operation, "Transition was a no-op, nothing to persist");
            return Ok(after);
        }

        self.repository.apply_patch(id, &patch).await?;
        after.updated_at = Utc::now();

        info!(
            character_id = %id,
            operation,
            fields = ?patch.touched_fields(),
            "Persisted condition change"
        );
        Ok(after)
    }

    async fn skill_transition<F>(
        &self,
        id: CharacterId,
        skill: SkillKey,
        operation: &'static str,
        next: F,
    ) -> Result<Character, ServiceError>
    where
        F: FnOnce(Skill) -> Skill + Send,
    {
        self.transition(id, operation, move |character| {
            Self::require_skill(&character, skill)?;
            Ok(character.map_skill(skill, next))
        })
        .await
    }
}

#[async_trait]
impl ConditionService for ConditionServiceImpl {
    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn toggle_wound(
        &self,
        id: CharacterId,
        skill: SkillKey,
        marked: bool,
    ) -> Result<Character, ServiceError> {
        self.skill_transition(id, skill, "toggle_wound", move |s| s.toggle_wound(marked))
            .await
    }

    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn toggle_scar(
        &self,
        id: CharacterId,
        skill: SkillKey,
        slot: usize,
    ) -> Result<Character, ServiceError> {
        if slot >= usize::from(SCAR_TRACK) {
            return Err(ServiceError::Validation(format!(
                "Scar slot {} is outside the track (0..{})",
                slot, SCAR_TRACK
            )));
        }
        self.transition(id, "toggle_scar", move |character| {
            let state = Self::require_skill(&character, skill)?.scar_slot(slot);
            debug!(slot, ?state, "Resolved scar box state");
            Ok(character.map_skill(skill, |s| s.toggle_scar(state)))
        })
        .await
    }

    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn toggle_scar_state(
        &self,
        id: CharacterId,
        skill: SkillKey,
        state: ScarSlot,
    ) -> Result<Character, ServiceError> {
        self.skill_transition(id, skill, "toggle_scar", move |s| s.toggle_scar(state))
            .await
    }

    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn reduce_die(
        &self,
        id: CharacterId,
        skill: SkillKey,
    ) -> Result<Character, ServiceError> {
        self.skill_transition(id, skill, "reduce_die", Skill::reduce_die)
            .await
    }

    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn augment_die(
        &self,
        id: CharacterId,
        skill: SkillKey,
    ) -> Result<Character, ServiceError> {
        self.skill_transition(id, skill, "augment_die", Skill::augment_die)
            .await
    }

    #[instrument(skip(self), fields(character_id = %id, skill = %skill))]
    async fn set_skill_max(
        &self,
        id: CharacterId,
        skill: SkillKey,
        max: DieSize,
    ) -> Result<Character, ServiceError> {
        self.skill_transition(id, skill, "set_skill_max", move |s| s.with_max(max))
            .await
    }

    #[instrument(skip(self), fields(character_id = %id))]
    async fn restore_skills(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.transition(id, "restore_skills", |c| Ok(c.restore_skills()))
            .await
    }

    #[instrument(skip(self), fields(character_id = %id))]
    async fn toggle_stress(
        &self,
        id: CharacterId,
        active: bool,
    ) -> Result<Character, ServiceError> {
        self.transition(id, "toggle_stress", move |c| {
            Ok(c.map_condition(|condition| condition.toggle_stress(active)))
        })
        .await
    }

    #[instrument(skip(self), fields(character_id = %id))]
    async fn drink(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.transition(id, "drink", |c| Ok(c.drink())).await
    }

    #[instrument(skip(self), fields(character_id = %id))]
    async fn rest(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.transition(id, "rest", |c| Ok(c.rest())).await
    }

    #[instrument(skip(self), fields(character_id = %id))]
    async fn toggle_editing_skills(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.transition(id, "toggle_editing_skills", |c| {
            Ok(c.toggle_editing_skills())
        })
        .await
    }
}
