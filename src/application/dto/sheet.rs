//! Sheet projection - everything the host needs to draw a character sheet
//!
//! Derived once from the character record: localized labels, die icons and
//! the state of every box on the wound, scar and stress tracks.

use serde::Serialize;

use super::ItemResponseDto;
use crate::application::ports::outbound::LocalizationPort;
use crate::domain::entities::{Character, Item, ScarSlot, Skill};
use crate::domain::value_objects::{DieSize, IntoxicationFlags, IntoxicationStage, SkillKey};

#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub key: SkillKey,
    pub label: String,
    pub value: DieSize,
    pub max: DieSize,
    pub dice_icon: String,
    pub wounds: Vec<bool>,
    pub scars: Vec<ScarSlot>,
}

impl SkillView {
    pub fn build(key: SkillKey, skill: &Skill, localization: &dyn LocalizationPort) -> Self {
        Self {
            key,
            label: skill_label(key, localization),
            value: skill.value,
            max: skill.max,
            dice_icon: skill.value.icon_path(),
            wounds: skill.wound_slots().to_vec(),
            scars: skill.scar_slots().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpellLevelView {
    pub level: u8,
    pub spells: Vec<ItemResponseDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheetView {
    pub id: String,
    pub name: String,
    pub stress: u8,
    pub stress_slots: Vec<bool>,
    pub intoxication: IntoxicationStage,
    pub drunk: IntoxicationFlags,
    pub editing_skills: bool,
    pub skills: Vec<SkillView>,
    pub gear: Vec<ItemResponseDto>,
    pub weapons: Vec<ItemResponseDto>,
    pub trained_skills: Vec<ItemResponseDto>,
    /// Always ten entries, levels 0 through 9
    pub spells: Vec<SpellLevelView>,
    pub unleveled_spells: Vec<ItemResponseDto>,
}

impl CharacterSheetView {
    pub fn build(character: &Character, localization: &dyn LocalizationPort) -> Self {
        let inventory = character.inventory();
        let views = |items: &[&Item]| -> Vec<ItemResponseDto> {
            items.iter().map(|item| ItemResponseDto::from(*item)).collect()
        };

        Self {
            id: character.id.to_string(),
            name: character.name.clone(),
            stress: character.condition.stress,
            stress_slots: character.condition.stress_slots().to_vec(),
            intoxication: character.condition.intoxication,
            drunk: character.condition.intoxication.flags(),
            editing_skills: character.editing_skills,
            skills: character
                .skills
                .iter()
                .map(|(key, skill)| SkillView::build(*key, skill, localization))
                .collect(),
            gear: views(&inventory.gear),
            weapons: views(&inventory.weapons),
            trained_skills: views(&inventory.trained_skills),
            spells: inventory
                .spells_by_level
                .iter()
                .enumerate()
                .map(|(level, spells)| SpellLevelView {
                    level: level as u8,
                    spells: views(spells),
                })
                .collect(),
            unleveled_spells: views(&inventory.unleveled_spells),
        }
    }
}

/// Localized skill label, falling back to the raw key
pub fn skill_label(key: SkillKey, localization: &dyn LocalizationPort) -> String {
    localization
        .localize(key.i18n_key())
        .unwrap_or_else(|| key.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ItemType;

    struct NoTable;

    impl LocalizationPort for NoTable {
        fn localize(&self, _key: &str) -> Option<String> {
            None
        }
    }

    struct Pirate;

    impl LocalizationPort for Pirate {
        fn localize(&self, key: &str) -> Option<String> {
            (key == "SAP.Sea").then(|| "Th' Briny Deep".to_string())
        }
    }

    #[test]
    fn test_sheet_projection() {
        let mut character = Character::new("Anne Bonny", DieSize::D8)
            .map_skill(SkillKey::Sea, |s| {
                s.reduce_die()
                    .toggle_wound(false)
                    .toggle_scar(ScarSlot::Empty)
                    .toggle_scar(ScarSlot::Empty)
                    .toggle_scar(ScarSlot::Filled)
            })
            .map_condition(|c| c.toggle_stress(false))
            .drink();
        character.add_item(Item::new("Cutlass", ItemType::Weapon));
        character.add_item(Item::new("Hex", ItemType::Spell).with_spell_level(2));

        let sheet = CharacterSheetView::build(&character, &Pirate);

        let sea = sheet.skills.iter().find(|s| s.key == SkillKey::Sea).unwrap();
        assert_eq!(sea.label, "Th' Briny Deep");
        assert_eq!(sea.value, DieSize::D6);
        assert_eq!(sea.dice_icon, "icons/dice/d6black.svg");
        assert_eq!(sea.wounds, vec![true, false, false]);
        assert_eq!(sea.scars, vec![ScarSlot::Burned, ScarSlot::Empty, ScarSlot::Empty]);

        assert_eq!(sheet.stress_slots, vec![true, false, false, false]);
        assert!(sheet.drunk.dizzy && !sheet.drunk.sick);
        assert_eq!(sheet.weapons.len(), 1);
        assert_eq!(sheet.spells.len(), 10);
        assert_eq!(sheet.spells[2].spells[0].name, "Hex");
    }

    #[test]
    fn test_label_falls_back_to_key() {
        assert_eq!(skill_label(SkillKey::Tradition, &NoTable), "tradition");
    }
}
