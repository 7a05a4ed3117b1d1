// Theme preference state.
// Read once at startup, flipped by an explicit toggle, written back on every toggle.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

const THEME_KEY: &str = "theme";

/// Two-valued color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A small key/value slot for user preferences.
pub trait PreferenceStore: Send {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location, if one can be determined.
    pub fn default_location() -> Option<Self> {
        crate::cache::paths::preferences_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_all()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        // Unreadable files are replaced rather than blocking the write.
        let mut prefs = self.load_all().unwrap_or_default();
        prefs.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&prefs)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// Process-local store, used when no config directory exists and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owned theme context handed to every view.
pub struct ThemeState {
    current: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemeState {
    /// Read the persisted preference, falling back to light.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let current = match store.read(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!(%value, "unrecognised theme preference, using light");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme preference, using light");
                Theme::default()
            }
        };

        Self { current, store }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. Persistence failures are logged and ignored.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();

        if let Err(e) = self.store.write(THEME_KEY, self.current.as_str()) {
            tracing::warn!(error = %e, theme = self.current.as_str(), "could not persist theme");
        }

        self.current
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use tempfile::TempDir;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(FolioError::Other("disk on fire".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(FolioError::Other("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_defaults_to_light() {
        let state = ThemeState::load(Box::new(MemoryPreferenceStore::default()));
        assert_eq!(state.get(), Theme::Light);
    }

    #[test]
    fn test_two_toggles_restore_original() {
        let mut state = ThemeState::load(Box::new(MemoryPreferenceStore::default()));
        let before = state.get();

        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.toggle(), before);
    }

    #[test]
    fn test_toggle_persists_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.json");

        let mut state = ThemeState::load(Box::new(FilePreferenceStore::new(&path)));
        state.toggle();

        let reloaded = ThemeState::load(Box::new(FilePreferenceStore::new(&path)));
        assert_eq!(reloaded.get(), Theme::Dark);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, r#"{"font":"mono"}"#).unwrap();

        let mut store = FilePreferenceStore::new(&path);
        store.write("theme", "dark").unwrap();

        assert_eq!(store.read("font").unwrap(), Some("mono".to_string()));
        assert_eq!(store.read("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_unknown_value_falls_back_to_light() {
        let mut store = MemoryPreferenceStore::default();
        store.write("theme", "solarized").unwrap();

        let state = ThemeState::load(Box::new(store));
        assert_eq!(state.get(), Theme::Light);
    }

    #[test]
    fn test_persistence_failure_still_toggles() {
        let mut state = ThemeState::load(Box::new(BrokenStore));
        assert_eq!(state.get(), Theme::Light);
        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.get(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let mut state = ThemeState::load(Box::new(FilePreferenceStore::new(&path)));
        assert_eq!(state.get(), Theme::Light);

        state.toggle();
        let reloaded = ThemeState::load(Box::new(FilePreferenceStore::new(&path)));
        assert_eq!(reloaded.get(), Theme::Dark);
    }
}
