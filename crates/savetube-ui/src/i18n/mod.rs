//! Lightweight JSON-backed translations with per-locale bundles.
//!
//! # Design
//! - Lookups are total: active locale, then [`DEFAULT_LOCALE`], then the key itself.
//! - The active language lives in one [`LanguageState`] value; switching goes through
//!   [`LanguageState::set`], which also persists the choice.

use crate::core::prefs::Preferences;
use serde_json::Value;
use std::sync::LazyLock;

/// Storage key holding the last chosen language code.
pub const LANG_KEY: &str = "savetube.lang";

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// Portuguese.
    Pt,
    /// English.
    En,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 2] {
        [Self::Pt, Self::En]
    }

    /// Two-letter language code, also used for `<html lang>`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    /// Short label for the language switcher.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Pt => "PT",
            Self::En => "EN",
        }
    }

    /// Map an arbitrary language tag (`pt-BR`, `EN`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::Pt;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with default-locale and key fallback.
    #[must_use]
    pub fn text(&self, path: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&DEFAULT_FALLBACK.tree, path))
            .unwrap_or_else(|| path.to_string())
    }

    /// Every leaf path defined by this bundle.
    #[cfg(test)]
    fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.tree, String::new(), &mut out);
        out
    }
}

static DEFAULT_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(DEFAULT_LOCALE));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str()
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
fn collect_paths(node: &Value, prefix: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let next = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_paths(child, next, out);
            }
        }
        Value::String(_) => out.push(prefix),
        _ => {}
    }
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::Pt => include_str!("../../i18n/pt.json"),
        LocaleCode::En => include_str!("../../i18n/en.json"),
    }
}

/// Process-wide language selection.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageState {
    bundle: TranslationBundle,
}

impl Default for LanguageState {
    fn default() -> Self {
        Self {
            bundle: TranslationBundle::new(DEFAULT_LOCALE),
        }
    }
}

impl LanguageState {
    /// Initialise from the persisted preference, or the default locale.
    #[must_use]
    pub fn load(prefs: &impl Preferences) -> Self {
        let locale = prefs
            .load(LANG_KEY)
            .and_then(|value| LocaleCode::from_lang_tag(&value))
            .unwrap_or(DEFAULT_LOCALE);
        Self {
            bundle: TranslationBundle::new(locale),
        }
    }

    /// Active locale.
    #[must_use]
    pub const fn locale(&self) -> LocaleCode {
        self.bundle.locale
    }

    /// Bundle for the active locale.
    #[must_use]
    pub const fn bundle(&self) -> &TranslationBundle {
        &self.bundle
    }

    /// Look up a key in the active language.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.bundle.text(key)
    }

    /// Switch the active language and persist the choice.
    pub fn set(&mut self, locale: LocaleCode, prefs: &mut impl Preferences) {
        if self.bundle.locale != locale {
            self.bundle = TranslationBundle::new(locale);
        }
        prefs.store(LANG_KEY, locale.code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::MemoryPreferences;

    #[test]
    fn missing_key_falls_back_to_key() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(bundle.text("nonexistent.key"), "nonexistent.key");
    }

    #[test]
    fn every_default_key_resolves_in_every_locale() {
        let keys = TranslationBundle::new(DEFAULT_LOCALE).keys();
        assert!(!keys.is_empty());
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            for key in &keys {
                let text = bundle.text(key);
                assert!(!text.is_empty(), "{key} empty for {locale:?}");
                assert_ne!(&text, key, "{key} unresolved for {locale:?}");
            }
        }
    }

    #[test]
    fn locales_share_the_same_key_set() {
        let mut default_keys = TranslationBundle::new(DEFAULT_LOCALE).keys();
        let mut english_keys = TranslationBundle::new(LocaleCode::En).keys();
        default_keys.sort();
        english_keys.sort();
        assert_eq!(default_keys, english_keys);
    }

    #[test]
    fn lang_tags_map_to_base_locale() {
        assert_eq!(LocaleCode::from_lang_tag("pt-BR"), Some(LocaleCode::Pt));
        assert_eq!(LocaleCode::from_lang_tag("EN"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
    }

    #[test]
    fn language_state_loads_persisted_choice() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(LanguageState::load(&prefs).locale(), DEFAULT_LOCALE);

        prefs.store(LANG_KEY, "en");
        let state = LanguageState::load(&prefs);
        assert_eq!(state.locale(), LocaleCode::En);
        assert_eq!(state.get("nav.terms"), "Terms");
    }

    #[test]
    fn unknown_persisted_value_uses_default() {
        let mut prefs = MemoryPreferences::default();
        prefs.store(LANG_KEY, "klingon");
        assert_eq!(LanguageState::load(&prefs).locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn set_switches_and_persists() {
        let mut prefs = MemoryPreferences::default();
        let mut state = LanguageState::load(&prefs);
        assert_eq!(state.get("nav.home"), "Início");

        state.set(LocaleCode::En, &mut prefs);
        assert_eq!(state.get("nav.home"), "Home");
        assert_eq!(prefs.load(LANG_KEY).as_deref(), Some("en"));
    }
}
