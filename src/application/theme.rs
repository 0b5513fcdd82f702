//! Theme persistence: one named preference in a client-side store, mirrored as
//! the single theme class on the document root.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{document::DocumentRoot, theme::ThemePreference};

/// Key under which the preference is stored.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
    #[error("preference store rejected `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

/// Persistent key-value storage owned by the client.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads, writes and applies the theme preference.
///
/// Store failures never surface: a failed read falls back to the default and a
/// failed write keeps the in-memory preference, so the current session stays
/// consistent even when nothing persists across reloads.
#[derive(Debug)]
pub struct ThemePersistence<S> {
    store: S,
    current: ThemePreference,
}

impl<S: PreferenceStore> ThemePersistence<S> {
    pub fn init(store: S, root: &mut DocumentRoot) -> Self {
        let current = read_preference(&store);
        apply_class(root, current);
        Self { store, current }
    }

    pub fn get_preference(&self) -> ThemePreference {
        self.current
    }

    pub fn set_preference(&mut self, preference: ThemePreference, root: &mut DocumentRoot) {
        if let Err(err) = self.store.write(THEME_STORAGE_KEY, preference.as_str()) {
            warn!(
                target = "folio::theme",
                error = %err,
                theme = preference.as_str(),
                "theme preference not persisted"
            );
        }
        self.current = preference;
        apply_class(root, preference);
    }

    pub fn toggle(&mut self, root: &mut DocumentRoot) -> ThemePreference {
        let next = self.current.other();
        self.set_preference(next, root);
        next
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn read_preference<S: PreferenceStore>(store: &S) -> ThemePreference {
    match store.read(THEME_STORAGE_KEY) {
        Ok(Some(raw)) => raw.parse::<ThemePreference>().unwrap_or_else(|err| {
            debug!(target = "folio::theme", error = %err, "ignoring stored theme");
            ThemePreference::default()
        }),
        Ok(None) => ThemePreference::default(),
        Err(err) => {
            warn!(target = "folio::theme", error = %err, "theme preference unreadable");
            ThemePreference::default()
        }
    }
}

fn apply_class(root: &mut DocumentRoot, preference: ThemePreference) {
    root.remove_class(preference.other().css_class());
    root.add_class(preference.css_class());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    fn theme_classes(root: &DocumentRoot) -> Vec<&str> {
        root.classes()
            .filter(|class| ThemePreference::ALL.iter().any(|t| t.css_class() == *class))
            .collect()
    }

    #[test]
    fn defaults_to_light_when_nothing_is_stored() {
        let mut root = DocumentRoot::new();
        let theme = ThemePersistence::init(MemoryPreferenceStore::new(), &mut root);

        assert_eq!(theme.get_preference(), ThemePreference::Light);
        assert_eq!(theme_classes(&root), vec!["light"]);
    }

    #[test]
    fn restores_stored_preference() {
        let mut root = DocumentRoot::new();
        let store = MemoryPreferenceStore::with_value(THEME_STORAGE_KEY, "dark");
        let theme = ThemePersistence::init(store, &mut root);

        assert_eq!(theme.get_preference(), ThemePreference::Dark);
        assert_eq!(theme_classes(&root), vec!["dark"]);
    }

    #[test]
    fn garbage_in_storage_falls_back_to_light() {
        let mut root = DocumentRoot::new();
        let store = MemoryPreferenceStore::with_value(THEME_STORAGE_KEY, "sepia");
        let theme = ThemePersistence::init(store, &mut root);

        assert_eq!(theme.get_preference(), ThemePreference::Light);
    }

    #[test]
    fn set_then_get_round_trips_with_a_single_class() {
        for preference in ThemePreference::ALL {
            let mut root = DocumentRoot::new();
            let mut theme = ThemePersistence::init(MemoryPreferenceStore::new(), &mut root);

            theme.set_preference(preference, &mut root);

            assert_eq!(theme.get_preference(), preference);
            assert_eq!(
                theme.store().get(THEME_STORAGE_KEY),
                Some(preference.as_str())
            );
            assert_eq!(theme_classes(&root), vec![preference.css_class()]);
        }
    }

    #[test]
    fn set_preference_is_idempotent() {
        let mut root = DocumentRoot::new();
        let mut theme = ThemePersistence::init(MemoryPreferenceStore::new(), &mut root);

        theme.set_preference(ThemePreference::Dark, &mut root);
        let snapshot = root.clone();
        theme.set_preference(ThemePreference::Dark, &mut root);

        assert_eq!(root, snapshot);
        assert_eq!(theme.get_preference(), ThemePreference::Dark);
    }

    #[test]
    fn toggle_twice_restores_preference_and_class() {
        let mut root = DocumentRoot::new();
        root.add_class("antialiased");
        let mut theme = ThemePersistence::init(MemoryPreferenceStore::new(), &mut root);
        let original = root.clone();

        assert_eq!(theme.toggle(&mut root), ThemePreference::Dark);
        assert_eq!(theme_classes(&root), vec!["dark"]);
        assert_eq!(theme.toggle(&mut root), ThemePreference::Light);

        assert_eq!(theme.get_preference(), ThemePreference::Light);
        assert_eq!(root, original);
        assert!(root.has_class("antialiased"));
    }

    #[test]
    fn failing_store_keeps_session_state() {
        let mut root = DocumentRoot::new();
        let mut theme = ThemePersistence::init(FailingStore, &mut root);
        assert_eq!(theme.get_preference(), ThemePreference::Light);

        theme.toggle(&mut root);

        assert_eq!(theme.get_preference(), ThemePreference::Dark);
        assert_eq!(theme_classes(&root), vec!["dark"]);
    }
}
