use super::store::{ConfigId, ConfigSummary, ConfigurationSet, ConfigurationStore, SavedConfiguration};
use crate::bodies::descriptor::BodyDescriptor;
use crate::error::StoreError;

/// In-process store. Contents are lost with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    set: ConfigurationSet,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl ConfigurationStore for MemoryStore {
    fn save(&mut self, name: &str, bodies: &[BodyDescriptor]) -> Result<ConfigId, StoreError> {
        self.set.insert_now(name, bodies)
    }

    fn list_all(&self) -> Result<Vec<ConfigSummary>, StoreError> {
        Ok(self.set.summaries())
    }

    fn fetch_by_id(&self, id: &ConfigId) -> Result<SavedConfiguration, StoreError> {
        self.set.find(id)
    }
}
