use wasm_bindgen::JsValue;
use web_sys::Storage;

use orrery_engine::{
    BodyDescriptor, ConfigId, ConfigSummary, ConfigurationSet, ConfigurationStore, SavedConfiguration, StoreError,
};

/// Configuration store kept as one JSON document under a `localStorage` key.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Backend("no window".into()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".into()))
    }

    fn load(&self) -> Result<ConfigurationSet, StoreError> {
        match self.storage()?.get_item(&self.key).map_err(js_error)? {
            Some(json) => ConfigurationSet::from_json(&json),
            None => Ok(ConfigurationSet::new()),
        }
    }

    fn store(&self, set: &ConfigurationSet) -> Result<(), StoreError> {
        let json = set.to_json()?;
        self.storage()?.set_item(&self.key, &json).map_err(js_error)
    }
}

impl ConfigurationStore for LocalStorageStore {
    fn save(&mut self, name: &str, bodies: &[BodyDescriptor]) -> Result<ConfigId, StoreError> {
        let mut set = self.load()?;
        let id = set.insert_now(name, bodies)?;
        self.store(&set).map_err(|e| {
            // Quota exceeded lands here.
            log::error!("localStorage write failed: {}", e);
            e
        })?;
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<ConfigSummary>, StoreError> {
        Ok(self.load()?.summaries())
    }

    fn fetch_by_id(&self, id: &ConfigId) -> Result<SavedConfiguration, StoreError> {
        self.load()?.find(id)
    }
}

fn js_error(e: JsValue) -> StoreError {
    StoreError::Backend(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}
