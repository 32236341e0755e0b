//! Value objects - Immutable objects defined by their attributes

mod condition;
mod dice;
mod die_size;
mod ids;
mod patch;
mod skill_key;

pub use condition::{CharacterCondition, IntoxicationFlags, IntoxicationStage, STRESS_TRACK};
pub use dice::{DiceFormula, DiceParseError};
pub use die_size::{DieSize, DieSizeError};
pub use ids::*;
pub use patch::{CharacterPatch, SkillPatch};
pub use skill_key::{SkillKey, SkillKeyError};
