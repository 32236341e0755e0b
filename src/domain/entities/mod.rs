//! Domain entities - Core records with identity or tracked condition

mod character;
mod item;
mod skill;

pub use character::Character;
pub use item::{classify, Item, ItemBuckets, ItemType, DEFAULT_ITEM_IMG, MAX_SPELL_LEVEL};
pub use skill::{ScarSlot, Skill, SCAR_TRACK, WOUND_TRACK};
