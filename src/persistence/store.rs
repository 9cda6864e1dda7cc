use super::files::atomic_write;
use crate::domain::{Settings, Task};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure reading or writing the data file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No saved state")]
    Missing,
}

/// Everything written to disk: settings plus the ordered task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Save/load collaborator used by the session controller
pub trait Storage {
    fn load(&self) -> Result<PersistedState, StorageError>;
    fn save(&self, state: &PersistedState) -> Result<(), StorageError>;
}

/// Pretty-printed JSON file, overwritten wholesale on every save
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<PersistedState, StorageError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::Missing
            } else {
                StorageError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        atomic_write(&self.path, &json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), tasks = state.tasks.len(), "state saved");
        Ok(())
    }
}

/// Load persisted state, falling back to defaults.
///
/// A missing or unparsable file yields the default state, which is written
/// back immediately. Loaded settings that fail validation are replaced by the
/// defaults while the tasks are kept.
pub fn load_or_default(storage: &dyn Storage) -> PersistedState {
    match storage.load() {
        Ok(mut state) => {
            if let Err(e) = state.settings.validate() {
                warn!(error = %e, "stored settings are invalid, using defaults");
                state.settings = Settings::default();
            }
            state
        }
        Err(e) => {
            match e {
                StorageError::Missing => debug!("no saved state, starting with defaults"),
                ref other => warn!(error = %other, "could not load saved state, starting with defaults"),
            }
            let state = PersistedState::default();
            if let Err(e) = storage.save(&state) {
                warn!(error = %e, "failed to write default state");
            }
            state
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    impl<S: Storage + ?Sized> Storage for Rc<S> {
        fn load(&self) -> Result<PersistedState, StorageError> {
            (**self).load()
        }

        fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
            (**self).save(state)
        }
    }

    /// In-memory storage that counts saves
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        state: RefCell<Option<PersistedState>>,
        saves: RefCell<usize>,
        fail_saves: bool,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_state(state: PersistedState) -> Self {
            Self {
                state: RefCell::new(Some(state)),
                ..Self::default()
            }
        }

        /// Storage whose saves always fail
        pub fn failing() -> Self {
            Self {
                fail_saves: true,
                ..Self::default()
            }
        }

        pub fn saved(&self) -> Option<PersistedState> {
            self.state.borrow().clone()
        }

        pub fn save_count(&self) -> usize {
            *self.saves.borrow()
        }
    }

    impl Storage for MemoryStorage {
        fn load(&self) -> Result<PersistedState, StorageError> {
            self.state.borrow().clone().ok_or(StorageError::Missing)
        }

        fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
            if self.fail_saves {
                return Err(StorageError::Io {
                    path: PathBuf::from("<memory>"),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.state.borrow_mut() = Some(state.clone());
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_state() -> PersistedState {
        let mut done = Task::new("Ship release".to_string(), 2);
        done.completed = 2;
        done.done = true;
        let mut partial = Task::new("Write docs ✍".to_string(), 4);
        partial.completed = 1;

        PersistedState {
            settings: Settings {
                focus_time_min: 50,
                short_break_time_min: 10,
                long_break_time_min: 30,
                long_break_interval: 3,
                dark_mode_enabled: true,
            },
            tasks: vec![done, partial],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("pomodoro_data.json"));

        let state = sample_state();
        storage.save(&state).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_file_layout() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pomodoro_data.json");
        let storage = JsonFileStorage::new(&path);
        storage.save(&sample_state()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["settings"]["focus_time_min"], 50);
        assert_eq!(value["settings"]["dark_mode_enabled"], true);
        assert_eq!(value["tasks"][0]["text"], "Ship release");
        assert_eq!(value["tasks"][1]["completed"], 1);
        assert_eq!(value["tasks"][1]["done"], false);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("nope.json"));
        assert!(matches!(storage.load(), Err(StorageError::Missing)));
    }

    #[test]
    fn test_load_or_default_writes_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pomodoro_data.json");
        let storage = JsonFileStorage::new(&path);

        let state = load_or_default(&storage);
        assert_eq!(state, PersistedState::default());
        assert!(path.exists());
        assert_eq!(storage.load().unwrap(), PersistedState::default());
    }

    #[test]
    fn test_load_or_default_corrupt_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pomodoro_data.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = JsonFileStorage::new(&path);

        assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
        let state = load_or_default(&storage);
        assert_eq!(state.settings, Settings::default());
        assert!(state.tasks.is_empty());
        assert!(storage.load().is_ok());
    }

    #[test]
    fn test_load_or_default_invalid_settings() {
        let mut state = sample_state();
        state.settings.focus_time_min = 0;
        let storage = MemoryStorage::with_state(state);

        let loaded = load_or_default(&storage);
        assert_eq!(loaded.settings, Settings::default());
        assert_eq!(loaded.tasks.len(), 2);
    }

    #[test]
    fn test_memory_storage_counts_saves() {
        let storage = MemoryStorage::new();
        storage.save(&sample_state()).unwrap();
        storage.save(&sample_state()).unwrap();
        assert_eq!(storage.save_count(), 2);
        assert_eq!(storage.saved(), Some(sample_state()));

        let failing = MemoryStorage::failing();
        assert!(failing.save(&sample_state()).is_err());
        assert_eq!(failing.save_count(), 0);
    }
}
