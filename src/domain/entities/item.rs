//! Item entity and the inventory classifier

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ItemId;

/// Image shown for items that were created without one
pub const DEFAULT_ITEM_IMG: &str = "icons/svg/mystery-man.svg";

/// Highest spell level with its own bucket
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Kind of a possession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Item,
    Weapon,
    Feature,
    Spell,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Item => "item",
            ItemType::Weapon => "weapon",
            ItemType::Feature => "feature",
            ItemType::Spell => "spell",
        }
    }

    /// Name given to a freshly created item of this type, e.g. "New Weapon"
    pub fn default_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("New {}{}", first.to_uppercase(), chars.as_str()),
            None => "New Item".to_string(),
        }
    }
}

/// Something a character owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub img: String,
    /// Only meaningful for spells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_level: Option<u8>,
    /// Roll formula, if the item can be rolled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            item_type,
            img: DEFAULT_ITEM_IMG.to_string(),
            spell_level: None,
            formula: None,
        }
    }

    /// A new item with the default name for its type
    pub fn blank(item_type: ItemType) -> Self {
        Self::new(item_type.default_name(), item_type)
    }

    pub fn with_spell_level(mut self, level: u8) -> Self {
        self.spell_level = Some(level);
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Image to display, falling back to the default one
    pub fn display_img(&self) -> &str {
        if self.img.is_empty() {
            DEFAULT_ITEM_IMG
        } else {
            &self.img
        }
    }
}

/// Inventory grouped for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemBuckets<'a> {
    pub gear: Vec<&'a Item>,
    pub weapons: Vec<&'a Item>,
    pub trained_skills: Vec<&'a Item>,
    /// Index is the spell level, 0..=9
    pub spells_by_level: [Vec<&'a Item>; MAX_SPELL_LEVEL as usize + 1],
    /// Spells with no level, or a level past 9
    pub unleveled_spells: Vec<&'a Item>,
}

/// Sort items into display buckets. Every item lands in exactly one bucket;
/// input order is kept within each bucket.
pub fn classify(items: &[Item]) -> ItemBuckets<'_> {
    let mut buckets = ItemBuckets::default();
    for item in items {
        match item.item_type {
            ItemType::Item => buckets.gear.push(item),
            ItemType::Weapon => buckets.weapons.push(item),
            ItemType::Feature => buckets.trained_skills.push(item),
            ItemType::Spell => match item.spell_level {
                Some(level) if level <= MAX_SPELL_LEVEL => {
                    buckets.spells_by_level[usize::from(level)].push(item)
                }
                _ => buckets.unleveled_spells.push(item),
            },
        }
    }
    buckets
}
