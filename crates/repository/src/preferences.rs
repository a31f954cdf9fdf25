use tafweed_core::{Language, Preferences, Toggle};
use tafweed_storage::KeyValueStore;
use tracing::debug;

use crate::error::RepositoryError;
use crate::SETTINGS_KEY;

/// Reads and writes [`Preferences`] under [`SETTINGS_KEY`].
///
/// Every setter persists the full settings object immediately.
#[derive(Debug)]
pub struct PreferencesStore<S> {
    store: S,
    current: Preferences,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    /// Load stored preferences. Missing storage yields the defaults; missing
    /// fields in a stored blob take their default values.
    pub fn open(store: S) -> Result<Self, RepositoryError> {
        let current = match store.get(SETTINGS_KEY)? {
            Some(blob) => serde_json::from_str(&blob).map_err(|e| RepositoryError::Corrupt {
                key: SETTINGS_KEY.to_string(),
                message: e.to_string(),
            })?,
            None => Preferences::default(),
        };
        Ok(Self { store, current })
    }

    pub fn get(&self) -> Preferences {
        self.current
    }

    pub fn set_language(&mut self, language: Language) -> Result<Preferences, RepositoryError> {
        let mut next = self.current;
        next.language = language;
        self.save(next)
    }

    pub fn set_flag(&mut self, toggle: Toggle, on: bool) -> Result<Preferences, RepositoryError> {
        let mut next = self.current;
        next.set_flag(toggle, on);
        self.save(next)
    }

    pub fn toggle(&mut self, toggle: Toggle) -> Result<Preferences, RepositoryError> {
        let mut next = self.current;
        next.toggle(toggle);
        self.save(next)
    }

    pub fn reset(&mut self) -> Result<Preferences, RepositoryError> {
        self.save(Preferences::default())
    }

    fn save(&mut self, next: Preferences) -> Result<Preferences, RepositoryError> {
        let blob = serde_json::to_string(&next).map_err(|e| RepositoryError::Encode {
            key: SETTINGS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(SETTINGS_KEY, &blob)?;
        debug!(language = %next.language, "persisted preferences");
        self.current = next;
        Ok(next)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tafweed_storage::MemoryStore;

    #[test]
    fn missing_blob_gives_defaults() {
        let prefs = PreferencesStore::open(MemoryStore::new()).unwrap();
        assert_eq!(prefs.get(), Preferences::default());
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, r#"{"highContrast":true}"#).unwrap();
        let prefs = PreferencesStore::open(store).unwrap();
        assert!(prefs.get().high_contrast);
        assert_eq!(prefs.get().language, Language::Ar);
    }

    #[test]
    fn setters_persist() {
        let mut prefs = PreferencesStore::open(MemoryStore::new()).unwrap();
        prefs.set_language(Language::En).unwrap();
        prefs.toggle(Toggle::BigButtons).unwrap();

        let reopened = PreferencesStore::open(prefs.into_store()).unwrap();
        assert_eq!(reopened.get().language, Language::En);
        assert!(reopened.get().big_buttons);
    }

    #[test]
    fn garbage_is_corrupt() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "not json").unwrap();
        let err = PreferencesStore::open(store).unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupt { .. }));
    }
}
