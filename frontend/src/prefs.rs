use gloo_storage::{LocalStorage, Storage};

const LANGUAGE_KEY: &str = "preferredLanguage";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Last-used recommendation language, if one was ever stored.
pub fn preferred_language() -> Option<String> {
    LocalStorage::get(LANGUAGE_KEY).ok()
}

/// Persists the language of a successful submission. Storage failures are
/// logged and swallowed; the preference is a convenience, not state.
pub fn remember_language(code: &str) {
    if let Err(err) = LocalStorage::set(LANGUAGE_KEY, code) {
        log::warn!("Failed to persist language preference: {err}");
    }
}
