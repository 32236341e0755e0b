//! The six skills every character carries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown skill: {0}")]
pub struct SkillKeyError(pub String);

/// Internal key of a skill, as stored on the character record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKey {
    Steel,
    Lead,
    Sea,
    Earth,
    Influence,
    Tradition,
}

impl SkillKey {
    /// Sheet order
    pub const ALL: [SkillKey; 6] = [
        SkillKey::Steel,
        SkillKey::Lead,
        SkillKey::Sea,
        SkillKey::Earth,
        SkillKey::Influence,
        SkillKey::Tradition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillKey::Steel => "steel",
            SkillKey::Lead => "lead",
            SkillKey::Sea => "sea",
            SkillKey::Earth => "earth",
            SkillKey::Influence => "influence",
            SkillKey::Tradition => "tradition",
        }
    }

    /// Key looked up in the localization tables
    pub fn i18n_key(self) -> &'static str {
        match self {
            SkillKey::Steel => "SAP.Steel",
            SkillKey::Lead => "SAP.Lead",
            SkillKey::Sea => "SAP.Sea",
            SkillKey::Earth => "SAP.Earth",
            SkillKey::Influence => "SAP.Influence",
            SkillKey::Tradition => "SAP.Tradition",
        }
    }
}

impl FromStr for SkillKey {
    type Err = SkillKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SkillKeyError(s.to_string()))
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
