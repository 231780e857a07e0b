//! Theme preference, persisted locally.

use std::sync::Arc;

use ipcman_state::StateStore;
use serde::{Deserialize, Serialize};

use crate::storage::{LocalStorage, StorageError, KEY_MENU_OPEN, KEY_THEME};

/// Store path of the current theme.
pub const THEME_PATH: &str = "theme";
/// Store path of the navigation-menu-open flag.
pub const MENU_OPEN_PATH: &str = "menu-open";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// Theme and menu preferences.
///
/// `System` is represented by the *absence* of the persisted key, so a
/// client that never chose a theme keeps following the OS preference.
pub struct ThemeStore {
    store: Arc<StateStore>,
    storage: Arc<LocalStorage>,
}

impl ThemeStore {
    pub fn new(store: Arc<StateStore>, storage: Arc<LocalStorage>) -> Self {
        let this = Self { store, storage };
        this.store.set(THEME_PATH, this.persisted());
        this.store.set(MENU_OPEN_PATH, this.persisted_menu_open());
        this
    }

    fn persisted(&self) -> Theme {
        self.storage.get::<Theme>(KEY_THEME).unwrap_or_default()
    }

    fn persisted_menu_open(&self) -> bool {
        self.storage.get::<bool>(KEY_MENU_OPEN).unwrap_or(true)
    }

    pub fn current(&self) -> Theme {
        self.store
            .get_as::<Theme>(THEME_PATH)
            .unwrap_or_default()
    }

    pub fn set(&self, theme: Theme) -> Result<(), StorageError> {
        match theme {
            Theme::System => self.storage.remove(KEY_THEME)?,
            _ => self.storage.set(KEY_THEME, &theme)?,
        }
        self.store.set(THEME_PATH, theme);
        Ok(())
    }

    /// Cycle Light → Dark, System → Light, Dark → System.
    pub fn toggle(&self) -> Result<Theme, StorageError> {
        let next = match self.current() {
            Theme::Light => Theme::Dark,
            Theme::System => Theme::Light,
            Theme::Dark => Theme::System,
        };
        self.set(next)?;
        Ok(next)
    }

    /// Collapse `System` to the OS preference.
    pub fn resolved(&self, system_pref: Theme) -> Theme {
        match self.current() {
            Theme::System => match system_pref {
                Theme::Dark => Theme::Dark,
                _ => Theme::Light,
            },
            theme => theme,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.store
            .get_as::<bool>(MENU_OPEN_PATH)
            .unwrap_or(true)
    }

    pub fn set_menu_open(&self, open: bool) -> Result<(), StorageError> {
        self.storage.set(KEY_MENU_OPEN, &open)?;
        self.store.set(MENU_OPEN_PATH, open);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme_store(dir: &tempfile::TempDir) -> ThemeStore {
        let storage = Arc::new(LocalStorage::open(dir.path().join("storage.json")).unwrap());
        ThemeStore::new(Arc::new(StateStore::new()), storage)
    }

    #[test]
    fn defaults_to_system_and_open_menu() {
        let dir = tempfile::tempdir().unwrap();
        let themes = theme_store(&dir);
        assert_eq!(themes.current(), Theme::System);
        assert!(themes.menu_open());
    }

    #[test]
    fn toggle_cycles_light_dark_system() {
        let dir = tempfile::tempdir().unwrap();
        let themes = theme_store(&dir);

        assert_eq!(themes.toggle().unwrap(), Theme::Light); // System -> Light
        assert_eq!(themes.toggle().unwrap(), Theme::Dark); // Light -> Dark
        assert_eq!(themes.toggle().unwrap(), Theme::System); // Dark -> System
    }

    #[test]
    fn system_choice_removes_persisted_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::open(dir.path().join("storage.json")).unwrap());
        let themes = ThemeStore::new(Arc::new(StateStore::new()), storage.clone());

        themes.set(Theme::Dark).unwrap();
        assert!(storage.contains(KEY_THEME));
        themes.set(Theme::System).unwrap();
        assert!(!storage.contains(KEY_THEME));
    }

    #[test]
    fn choice_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        theme_store(&dir).set(Theme::Dark).unwrap();

        let themes = theme_store(&dir);
        assert_eq!(themes.current(), Theme::Dark);
    }

    #[test]
    fn resolved_collapses_system_only() {
        let dir = tempfile::tempdir().unwrap();
        let themes = theme_store(&dir);

        assert_eq!(themes.resolved(Theme::Dark), Theme::Dark);
        assert_eq!(themes.resolved(Theme::Light), Theme::Light);

        themes.set(Theme::Light).unwrap();
        assert_eq!(themes.resolved(Theme::Dark), Theme::Light);
    }

    #[test]
    fn menu_flag_persists() {
        let dir = tempfile::tempdir().unwrap();
        theme_store(&dir).set_menu_open(false).unwrap();
        assert!(!theme_store(&dir).menu_open());
    }
}
