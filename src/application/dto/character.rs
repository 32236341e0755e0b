use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::RollOutcome;
use crate::domain::entities::{Character, Item, ItemType, ScarSlot, Skill};
use crate::domain::value_objects::{DieSize, IntoxicationFlags, IntoxicationStage, SkillKey};

#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequestDto {
    pub name: String,
    /// Starting die for every skill; the configured default when absent
    #[serde(default)]
    pub starting_die: Option<DieSize>,
    /// Per-skill baseline overrides
    #[serde(default)]
    pub skill_max: BTreeMap<SkillKey, DieSize>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleWoundRequestDto {
    /// The clicked box was already marked
    pub marked: bool,
}

/// A click on the scar track. Send either the box index, whose state is
/// then read from the stored counters, or the state the caller already saw.
#[derive(Debug, Deserialize)]
pub struct ToggleScarRequestDto {
    /// Index of the clicked box on the scar track, 0..=2
    #[serde(default)]
    pub slot: Option<usize>,
    #[serde(default)]
    pub state: Option<ScarSlot>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleStressRequestDto {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetSkillMaxRequestDto {
    pub max: DieSize,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequestDto {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spell_level: Option<u8>,
    #[serde(default)]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillResponseDto {
    pub value: DieSize,
    pub max: DieSize,
    pub wounds: u8,
    pub scars: u8,
    pub used_scars: u8,
}

impl From<Skill> for SkillResponseDto {
    fn from(skill: Skill) -> Self {
        Self {
            value: skill.value,
            max: skill.max,
            wounds: skill.wounds,
            scars: skill.scars,
            used_scars: skill.used_scars,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponseDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub img: String,
    pub spell_level: Option<u8>,
    pub formula: Option<String>,
}

impl From<&Item> for ItemResponseDto {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            item_type: item.item_type,
            img: item.display_img().to_string(),
            spell_level: item.spell_level,
            formula: item.formula.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponseDto {
    pub id: String,
    pub name: String,
    pub stress: u8,
    pub intoxication: IntoxicationStage,
    pub drunk: IntoxicationFlags,
    pub editing_skills: bool,
    pub skills: BTreeMap<SkillKey, SkillResponseDto>,
    pub items: Vec<ItemResponseDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            stress: character.condition.stress,
            intoxication: character.condition.intoxication,
            drunk: character.condition.intoxication.flags(),
            editing_skills: character.editing_skills,
            skills: character
                .skills
                .iter()
                .map(|(key, skill)| (*key, SkillResponseDto::from(*skill)))
                .collect(),
            items: character.items.iter().map(ItemResponseDto::from).collect(),
            created_at: character.created_at.to_rfc3339(),
            updated_at: character.updated_at.to_rfc3339(),
            name: character.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RollResponseDto {
    pub formula: String,
    pub label: Option<String>,
    pub rolls: Vec<i32>,
    pub total: i32,
}

impl From<RollOutcome> for RollResponseDto {
    fn from(outcome: RollOutcome) -> Self {
        Self {
            formula: outcome.formula,
            label: outcome.label,
            rolls: outcome.rolls,
            total: outcome.total,
        }
    }
}
