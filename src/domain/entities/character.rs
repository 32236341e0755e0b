//! Character entity - skills, whole-character condition and possessions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{classify, Item, ItemBuckets, Skill};
use crate::domain::value_objects::{CharacterCondition, CharacterId, DieSize, ItemId, SkillKey};

/// A player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// One record per skill, always all six
    pub skills: BTreeMap<SkillKey, Skill>,
    pub condition: CharacterCondition,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Sheet is in "edit skills" mode
    #[serde(default)]
    pub editing_skills: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: impl Into<String>, starting_die: DieSize) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            skills: SkillKey::ALL
                .into_iter()
                .map(|key| (key, Skill::new(starting_die)))
                .collect(),
            condition: CharacterCondition::default(),
            items: Vec::new(),
            editing_skills: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_skill(mut self, key: SkillKey, skill: Skill) -> Self {
        self.skills.insert(key, skill);
        self
    }

    pub fn skill(&self, key: SkillKey) -> Option<&Skill> {
        self.skills.get(&key)
    }

    /// Apply `f` to one skill, returning the next character. Unknown skills
    /// leave the character untouched.
    pub fn map_skill(mut self, key: SkillKey, f: impl FnOnce(Skill) -> Skill) -> Self {
        if let Some(skill) = self.skills.get_mut(&key) {
            *skill = f(*skill);
        }
        self
    }

    pub fn map_condition(mut self, f: impl FnOnce(CharacterCondition) -> CharacterCondition) -> Self {
        self.condition = f(self.condition);
        self
    }

    /// Every unwounded skill goes back to its baseline die
    pub fn restore_skills(mut self) -> Self {
        for skill in self.skills.values_mut() {
            *skill = skill.restore_to_max();
        }
        self
    }

    /// A drink restores unwounded skills and pushes intoxication one stage on
    pub fn drink(self) -> Self {
        self.restore_skills().map_condition(CharacterCondition::after_drink)
    }

    pub fn rest(self) -> Self {
        self.map_condition(CharacterCondition::rested)
    }

    pub fn toggle_editing_skills(mut self) -> Self {
        self.editing_skills = !self.editing_skills;
        self
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn inventory(&self) -> ItemBuckets<'_> {
        classify(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ItemType;
    use crate::domain::value_objects::IntoxicationStage;

    fn worn_out() -> Character {
        Character::new("Anne Bonny", DieSize::D8)
            .map_skill(SkillKey::Steel, |s| s.reduce_die().reduce_die())
            .map_skill(SkillKey::Sea, |s| s.reduce_die().toggle_wound(false))
    }

    #[test]
    fn test_new_character_has_all_skills() {
        let character = Character::new("Anne Bonny", DieSize::D6);
        assert_eq!(character.skills.len(), SkillKey::ALL.len());
        assert!(character
            .skills
            .values()
            .all(|skill| skill.value == DieSize::D6 && skill.max == DieSize::D6));
        assert_eq!(character.condition.intoxication, IntoxicationStage::Sober);
    }

    #[test]
    fn test_drink_restores_only_unwounded_skills() {
        let character = worn_out().drink();

        assert_eq!(character.skill(SkillKey::Steel).unwrap().value, DieSize::D8);
        assert_eq!(character.skill(SkillKey::Sea).unwrap().value, DieSize::D6);
        assert_eq!(character.condition.intoxication, IntoxicationStage::Dizzy);
    }

    #[test]
    fn test_three_drinks_then_ceiling() {
        let mut character = Character::new("Calico Jack", DieSize::D6);
        for _ in 0..3 {
            character = character.drink();
        }
        assert_eq!(character.condition.intoxication, IntoxicationStage::Drunk);
        character = character.drink();
        assert_eq!(character.condition.intoxication, IntoxicationStage::Drunk);
    }

    #[test]
    fn test_rest_leaves_skills_alone() {
        let before = worn_out().drink().drink();
        let after = before.clone().rest();
        assert_eq!(after.condition.intoxication, IntoxicationStage::Sober);
        assert_eq!(after.skills, before.skills);
        assert_eq!(after.condition.stress, before.condition.stress);
    }

    #[test]
    fn test_item_management() {
        let mut character = Character::new("Mary Read", DieSize::D6);
        let sword = Item::new("Cutlass", ItemType::Weapon);
        let id = sword.id;
        character.add_item(sword);
        character.add_item(Item::new("Rope", ItemType::Item));

        assert_eq!(character.inventory().weapons.len(), 1);
        assert_eq!(character.inventory().gear.len(), 1);
        assert_eq!(character.remove_item(id).map(|i| i.name), Some("Cutlass".to_string()));
        assert!(character.item(id).is_none());
        assert!(character.remove_item(id).is_none());
    }

    #[test]
    fn test_toggle_editing_skills() {
        let character = Character::new("Mary Read", DieSize::D6).toggle_editing_skills();
        assert!(character.editing_skills);
        assert!(!character.toggle_editing_skills().editing_skills);
    }
}
