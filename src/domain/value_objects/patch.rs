//! Minimal changed-field patches handed to persistence
//!
//! A transition computes the next character, then `CharacterPatch::diff`
//! extracts only the fields that moved. Persistence merges the patch into the
//! stored record and leaves every unspecified field untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CharacterCondition, DieSize, IntoxicationStage, SkillKey};
use crate::domain::entities::{Character, Skill};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DieSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<DieSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wounds: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_scars: Option<u8>,
}

fn changed<T: PartialEq + Copy>(before: T, after: T) -> Option<T> {
    (before != after).then_some(after)
}

impl SkillPatch {
    pub fn diff(before: &Skill, after: &Skill) -> Self {
        Self {
            value: changed(before.value, after.value),
            max: changed(before.max, after.max),
            wounds: changed(before.wounds, after.wounds),
            scars: changed(before.scars, after.scars),
            used_scars: changed(before.used_scars, after.used_scars),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge into a skill. The result is re-clamped so a stale patch can never
    /// leave `used_scars` above `scars`.
    pub fn apply(&self, skill: Skill) -> Skill {
        Skill::clamped(
            self.value.unwrap_or(skill.value),
            self.max.unwrap_or(skill.max),
            self.wounds.unwrap_or(skill.wounds),
            self.scars.unwrap_or(skill.scars),
            self.used_scars.unwrap_or(skill.used_scars),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intoxication: Option<IntoxicationStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_skills: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skills: BTreeMap<SkillKey, SkillPatch>,
}

impl CharacterPatch {
    pub fn diff(before: &Character, after: &Character) -> Self {
        let skills = after
            .skills
            .iter()
            .filter_map(|(key, next)| {
                let patch = match before.skills.get(key) {
                    Some(prev) => SkillPatch::diff(prev, next),
                    None => SkillPatch {
                        value: Some(next.value),
                        max: Some(next.max),
                        wounds: Some(next.wounds),
                        scars: Some(next.scars),
                        used_scars: Some(next.used_scars),
                    },
                };
                (!patch.is_empty()).then_some((*key, patch))
            })
            .collect();

        Self {
            name: (before.name != after.name).then(|| after.name.clone()),
            stress: changed(before.condition.stress, after.condition.stress),
            intoxication: changed(before.condition.intoxication, after.condition.intoxication),
            editing_skills: changed(before.editing_skills, after.editing_skills),
            skills,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(&self, character: &mut Character) {
        if let Some(name) = &self.name {
            character.name = name.clone();
        }
        if let Some(stress) = self.stress {
            character.condition =
                CharacterCondition::new(stress, character.condition.intoxication);
        }
        if let Some(intoxication) = self.intoxication {
            character.condition.intoxication = intoxication;
        }
        if let Some(editing) = self.editing_skills {
            character.editing_skills = editing;
        }
        for (key, patch) in &self.skills {
            let current = character.skills.get(key).copied().unwrap_or_default();
            character.skills.insert(*key, patch.apply(current));
        }
    }

    /// Names of the top-level fields this patch touches, for logging
    pub fn touched_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name".to_string());
        }
        if self.stress.is_some() {
            fields.push("stress".to_string());
        }
        if self.intoxication.is_some() {
            fields.push("intoxication".to_string());
        }
        if self.editing_skills.is_some() {
            fields.push("editing_skills".to_string());
        }
        fields.extend(self.skills.keys().map(|key| format!("skills.{}", key)));
        fields
    }
}
