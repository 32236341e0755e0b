//! Static English label table

use std::collections::HashMap;

use crate::application::ports::outbound::LocalizationPort;

const ENGLISH: &[(&str, &str)] = &[
    ("SAP.Steel", "Steel"),
    ("SAP.Lead", "Lead"),
    ("SAP.Sea", "Sea"),
    ("SAP.Earth", "Earth"),
    ("SAP.Influence", "Influence"),
    ("SAP.Tradition", "Tradition"),
];

#[derive(Debug, Clone)]
pub struct StaticLocalization {
    labels: HashMap<String, String>,
}

impl StaticLocalization {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            labels: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Default for StaticLocalization {
    fn default() -> Self {
        Self::english()
    }
}

impl LocalizationPort for StaticLocalization {
    fn localize(&self, key: &str) -> Option<String> {
        self.labels.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SkillKey;

    #[test]
    fn test_every_skill_has_an_english_label() {
        let table = StaticLocalization::english();
        for key in SkillKey::ALL {
            assert!(table.localize(key.i18n_key()).is_some(), "missing {}", key);
        }
        assert_eq!(table.localize("SAP.Influence").as_deref(), Some("Influence"));
    }

    #[test]
    fn test_unknown_key() {
        assert!(StaticLocalization::english().localize("SAP.Nope").is_none());
    }
}
