//! Domain layer - Core game rules with no external dependencies
//!
//! This layer contains:
//! - Entities: Character, Skill, Item
//! - Value Objects: ids, die sizes, skill keys, condition, dice formulas, patches
//!
//! Every rule here is a pure function over in-memory records. Nothing in this
//! layer rolls dice, stores data or renders anything.

pub mod entities;
pub mod value_objects;
