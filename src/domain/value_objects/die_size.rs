//! Die sizes a skill can roll with
//!
//! Skills only ever roll a d4, d6, d8 or d10. Shrinking and growing move one
//! step along that ladder and stop at either end.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid die size: d{0} (expected 4, 6, 8 or 10)")]
pub struct DieSizeError(pub u8);

/// Face count of the die a skill rolls
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum DieSize {
    D4,
    #[default]
    D6,
    D8,
    D10,
}

impl DieSize {
    pub const ALL: [DieSize; 4] = [DieSize::D4, DieSize::D6, DieSize::D8, DieSize::D10];

    pub fn faces(self) -> u8 {
        match self {
            DieSize::D4 => 4,
            DieSize::D6 => 6,
            DieSize::D8 => 8,
            DieSize::D10 => 10,
        }
    }

    /// Nearest die for an arbitrary face count.
    ///
    /// Odd counts round down to the die below, anything under 4 becomes a d4
    /// and anything over 10 becomes a d10.
    pub fn clamped(faces: i64) -> Self {
        match faces {
            i64::MIN..=5 => DieSize::D4,
            6..=7 => DieSize::D6,
            8..=9 => DieSize::D8,
            _ => DieSize::D10,
        }
    }

    /// One step down the ladder; a d4 stays a d4
    pub fn smaller(self) -> Self {
        match self {
            DieSize::D4 | DieSize::D6 => DieSize::D4,
            DieSize::D8 => DieSize::D6,
            DieSize::D10 => DieSize::D8,
        }
    }

    /// One step up the ladder; a d10 stays a d10
    pub fn larger(self) -> Self {
        match self {
            DieSize::D4 => DieSize::D6,
            DieSize::D6 => DieSize::D8,
            DieSize::D8 | DieSize::D10 => DieSize::D10,
        }
    }

    /// Sheet icon for this die
    pub fn icon_path(self) -> String {
        format!("icons/dice/d{}black.svg", self.faces())
    }
}

impl TryFrom<u8> for DieSize {
    type Error = DieSizeError;

    fn try_from(faces: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|die| die.faces() == faces)
            .ok_or(DieSizeError(faces))
    }
}

impl From<DieSize> for u8 {
    fn from(die: DieSize) -> u8 {
        die.faces()
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_stops_at_both_ends() {
        assert_eq!(DieSize::D4.smaller(), DieSize::D4);
        assert_eq!(DieSize::D10.larger(), DieSize::D10);
        assert_eq!(DieSize::D6.larger(), DieSize::D8);
        assert_eq!(DieSize::D8.smaller(), DieSize::D6);
    }

    #[test]
    fn test_clamped_rounds_into_the_set() {
        assert_eq!(DieSize::clamped(-3), DieSize::D4);
        assert_eq!(DieSize::clamped(5), DieSize::D4);
        assert_eq!(DieSize::clamped(7), DieSize::D6);
        assert_eq!(DieSize::clamped(8), DieSize::D8);
        assert_eq!(DieSize::clamped(20), DieSize::D10);
    }

    #[test]
    fn test_serializes_as_face_count() {
        assert_eq!(serde_json::to_string(&DieSize::D8).unwrap(), "8");
        let die: DieSize = serde_json::from_str("10").unwrap();
        assert_eq!(die, DieSize::D10);
        assert!(serde_json::from_str::<DieSize>("12").is_err());
    }

    #[test]
    fn test_icon_path() {
        assert_eq!(DieSize::D6.icon_path(), "icons/dice/d6black.svg");
    }
}
