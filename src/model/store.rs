//! JSON file storage for the UI snapshot

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::collaborators::StateStore;
use super::persistent::PersistentUiState;

/// Stores each snapshot as `<dir>/<id>.json`
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, id: &str) -> Result<Option<PersistentUiState>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(state))
    }

    fn save(&self, id: &str, state: &PersistentUiState) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating {}", self.dir.display()))?;
        }
        let path = self.path_for(id);
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::persistent::TimerSettings;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load("ui_state").unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let state = PersistentUiState {
            home_page: 4,
            timer: TimerSettings {
                enabled: true,
                minutes: 45,
                ..TimerSettings::default()
            },
        };

        store.save("ui_state", &state).unwrap();
        assert_eq!(store.load("ui_state").unwrap(), Some(state));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path_for("ui_state"), "{not json").unwrap();
        assert!(store.load("ui_state").is_err());
    }
}
