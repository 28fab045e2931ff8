use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{ConfigId, ConfigSummary, ConfigurationSet, ConfigurationStore, SavedConfiguration};
use crate::bodies::descriptor::BodyDescriptor;
use crate::error::StoreError;

/// Store backed by one JSON document on disk. Every save rewrites the file;
/// reads go to disk so edits by other processes are seen.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ConfigurationSet, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => ConfigurationSet::from_json(&json),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigurationSet::new()),
            Err(e) => {
                log::error!("reading {} failed: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    fn store(&self, set: &ConfigurationSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write then rename so a crash never leaves a half-written document.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, set.to_json()?)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                log::error!("writing {} failed: {}", self.path.display(), e);
                StoreError::from(e)
            })
    }
}

impl ConfigurationStore for JsonFileStore {
    fn save(&mut self, name: &str, bodies: &[BodyDescriptor]) -> Result<ConfigId, StoreError> {
        let mut set = self.load()?;
        let id = set.insert_now(name, bodies)?;
        self.store(&set)?;
        log::info!("saved configuration {} to {}", id, self.path.display());
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<ConfigSummary>, StoreError> {
        Ok(self.load()?.summaries())
    }

    fn fetch_by_id(&self, id: &ConfigId) -> Result<SavedConfiguration, StoreError> {
        self.load()?.find(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::defaults::default_bodies;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("configs.json"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn saved_configuration_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("configs.json");
        let bodies = default_bodies();

        let id = {
            let mut store = JsonFileStore::new(&path);
            store.save("MyConfig", &bodies).unwrap()
        };

        let store = JsonFileStore::new(&path);
        let listed = store.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(store.fetch_by_id(&id).unwrap().bodies, bodies);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("configs.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list_all(), Err(StoreError::Json(_))));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("configs.json"));
        store.save("A", &default_bodies()).unwrap();
        assert!(matches!(
            store.fetch_by_id(&ConfigId::from("cfg-0-99")),
            Err(StoreError::NotFound(_))
        ));
    }
}
