//! Whole-character condition: stress and intoxication

use serde::{Deserialize, Serialize};

/// Number of boxes on the stress track
pub const STRESS_TRACK: u8 = 4;

/// How drunk a character is. Only ever moves forward through drinking and
/// back to `Sober` through rest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IntoxicationStage {
    #[default]
    Sober,
    Dizzy,
    Sick,
    Drunk,
}

impl IntoxicationStage {
    /// The stage after one more drink. `Drunk` is the ceiling.
    pub fn after_drink(self) -> Self {
        match self {
            IntoxicationStage::Sick | IntoxicationStage::Drunk => IntoxicationStage::Drunk,
            IntoxicationStage::Dizzy => IntoxicationStage::Sick,
            IntoxicationStage::Sober => IntoxicationStage::Dizzy,
        }
    }

    pub fn flags(self) -> IntoxicationFlags {
        IntoxicationFlags {
            dizzy: self >= IntoxicationStage::Dizzy,
            sick: self >= IntoxicationStage::Sick,
            drunk: self >= IntoxicationStage::Drunk,
        }
    }
}

/// Boolean view of the stage, the shape the sheet stores and shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntoxicationFlags {
    pub dizzy: bool,
    pub sick: bool,
    pub drunk: bool,
}

impl From<IntoxicationFlags> for IntoxicationStage {
    fn from(flags: IntoxicationFlags) -> Self {
        if flags.drunk {
            IntoxicationStage::Drunk
        } else if flags.sick {
            IntoxicationStage::Sick
        } else if flags.dizzy {
            IntoxicationStage::Dizzy
        } else {
            IntoxicationStage::Sober
        }
    }
}

/// Counters that belong to the character rather than to a single skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCondition {
    /// 0..=4
    pub stress: u8,
    pub intoxication: IntoxicationStage,
}

impl CharacterCondition {
    pub fn new(stress: u8, intoxication: IntoxicationStage) -> Self {
        Self {
            stress: stress.min(STRESS_TRACK),
            intoxication,
        }
    }

    /// Clicking a marked box clears one, clicking an unmarked box adds one.
    pub fn toggle_stress(self, currently_active: bool) -> Self {
        let stress = if currently_active && self.stress > 0 {
            self.stress - 1
        } else if self.stress < STRESS_TRACK {
            self.stress + 1
        } else {
            self.stress
        };
        Self { stress, ..self }
    }

    pub fn after_drink(self) -> Self {
        Self {
            intoxication: self.intoxication.after_drink(),
            ..self
        }
    }

    /// Rest sobers the character up and touches nothing else
    pub fn rested(self) -> Self {
        Self {
            intoxication: IntoxicationStage::Sober,
            ..self
        }
    }

    /// Box `i` of the stress track is marked iff `stress > i`
    pub fn stress_slots(&self) -> [bool; STRESS_TRACK as usize] {
        std::array::from_fn(|i| usize::from(self.stress) > i)
    }
}
