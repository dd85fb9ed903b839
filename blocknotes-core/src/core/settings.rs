//! Application settings persistence for Blocknotes.
//!
//! Stores user preferences (database location, note list ordering) in a JSON
//! file at an OS-appropriate location.

use crate::{NoteRepository, Result, SortOption, SqliteNoteStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// SQLite file holding the notes.
    pub database_path: String,
    /// Ordering applied to the note list.
    pub default_sort: SortOption,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path().to_string_lossy().to_string(),
            default_sort: SortOption::default(),
        }
    }
}

impl AppSettings {
    /// Opens (creating if needed) the notes database named by these settings.
    pub fn open_repository(&self) -> Result<NoteRepository<SqliteNoteStore>> {
        if let Some(parent) = Path::new(&self.database_path).parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(NoteRepository::new(SqliteNoteStore::open(&self.database_path)?))
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/blocknotes/settings.json`
/// - Windows: `%APPDATA%/Blocknotes/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Blocknotes").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("blocknotes").join("settings.json")
    }
}

/// Returns the default database location: `<data dir>/blocknotes/notes.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blocknotes")
        .join("notes.db")
}

/// Loads settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings file {}: {e}", path.as_ref().display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to the default location.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Note;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings_from(dir.path().join("absent.json"));
        assert_eq!(settings, AppSettings::default());
        assert!(settings.database_path.ends_with("notes.db"));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            database_path: "/tmp/elsewhere.db".to_string(),
            default_sort: SortOption::TitleAsc,
        };
        save_settings_to(&path, &settings).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"databasePath\""));
        assert!(written.contains("\"TitleAsc\""));
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"defaultSort":"CreatedAsc"}"#).unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.default_sort, SortOption::CreatedAsc);
        assert_eq!(settings.database_path, AppSettings::default().database_path);
    }

    #[test]
    fn test_open_repository_creates_database() {
        let dir = TempDir::new().unwrap();
        let settings = AppSettings {
            database_path: dir.path().join("data").join("notes.db").to_string_lossy().to_string(),
            default_sort: SortOption::default(),
        };

        let mut repo = settings.open_repository().unwrap();
        repo.insert_note(&Note::new("First", "", "")).unwrap();
        drop(repo);

        let repo = settings.open_repository().unwrap();
        assert_eq!(repo.notes_count().unwrap(), 1);
    }
}
