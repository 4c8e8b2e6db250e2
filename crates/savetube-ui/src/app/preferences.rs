//! Persistence and environment helpers for the app shell.

use crate::core::prefs::Preferences;
use crate::i18n::LocaleCode;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::document;

/// `localStorage`-backed preference store.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalPreferences;

impl Preferences for LocalPreferences {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn store(&mut self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            log_storage_error(key, &err.to_string());
        }
    }
}

/// Mirror the active language on `<html lang>`.
pub(crate) fn apply_document_lang(locale: LocaleCode) {
    if let Some(root) = document().document_element() {
        if let Err(err) = root.set_attribute("lang", locale.code()) {
            console::error!("document lang update failed", err);
        }
    }
}

/// Read the `data-api-base` override from the mount node.
pub(crate) fn api_base_override(root: &web_sys::Element) -> Option<String> {
    root.get_attribute("data-api-base")
}

fn log_storage_error(key: &str, err: &str) {
    console::error!("preference persist failed", key, err);
}
