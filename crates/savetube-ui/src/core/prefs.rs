//! Persisted user preferences behind a small storage port.
//!
//! The browser binding writes to `LocalStorage`; tests use [`MemoryPreferences`].

use std::collections::HashMap;

/// Key/value store for user preferences.
pub trait Preferences {
    /// Read a stored value.
    fn load(&self, key: &str) -> Option<String>;
    /// Persist a value, replacing any previous one.
    fn store(&mut self, key: &str, value: &str);
}

/// In-memory preference store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl Preferences for MemoryPreferences {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_overwrites_previous_value() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.load("k"), None);
        prefs.store("k", "pt");
        prefs.store("k", "en");
        assert_eq!(prefs.load("k").as_deref(), Some("en"));
    }
}
