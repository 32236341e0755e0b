//! Localization port - Display labels for internal keys

pub trait LocalizationPort: Send + Sync {
    /// Label for `key`, or `None` when the table has no entry
    fn localize(&self, key: &str) -> Option<String>;
}
