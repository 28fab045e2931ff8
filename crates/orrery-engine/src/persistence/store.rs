//! Named configuration storage.
//!
//! A configuration is a full snapshot of the body collection under a
//! user-supplied name. Names need not be unique; the generated id is the key.
//! Stores are synchronous and never called from the frame path.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bodies::descriptor::BodyDescriptor;
use crate::error::StoreError;

/// Store-generated configuration identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(pub String);

impl ConfigId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfigId {
    fn from(s: &str) -> Self {
        ConfigId(s.to_string())
    }
}

/// A saved body collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    pub id: ConfigId,
    pub name: String,
    pub bodies: Vec<BodyDescriptor>,
    pub created_at: DateTime<Utc>,
}

/// Listing entry: everything but the bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub id: ConfigId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&SavedConfiguration> for ConfigSummary {
    fn from(c: &SavedConfiguration) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            created_at: c.created_at,
        }
    }
}

/// Persistence collaborator contract.
pub trait ConfigurationStore {
    /// Store `bodies` under `name` and return the new id.
    fn save(&mut self, name: &str, bodies: &[BodyDescriptor]) -> Result<ConfigId, StoreError>;

    /// Every stored configuration, oldest first.
    fn list_all(&self) -> Result<Vec<ConfigSummary>, StoreError>;

    fn fetch_by_id(&self, id: &ConfigId) -> Result<SavedConfiguration, StoreError>;
}

/// Trim a configuration name; empty names are rejected.
pub fn validate_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Serialisable collection of configurations. Backends that persist a single
/// document (a JSON file, a `localStorage` key) load and store this whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationSet {
    configurations: Vec<SavedConfiguration>,
    next_seq: u64,
}

impl ConfigurationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored document. Empty input is an empty set.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Append a configuration stamped `created_at`.
    pub fn insert(
        &mut self,
        name: &str,
        bodies: &[BodyDescriptor],
        created_at: DateTime<Utc>,
    ) -> Result<ConfigId, StoreError> {
        let name = validate_name(name)?;
        self.next_seq += 1;
        let id = ConfigId(format!("cfg-{:x}-{}", created_at.timestamp_millis(), self.next_seq));
        self.configurations.push(SavedConfiguration {
            id: id.clone(),
            name,
            bodies: bodies.to_vec(),
            created_at,
        });
        Ok(id)
    }

    /// Append a configuration stamped with the current time.
    pub fn insert_now(&mut self, name: &str, bodies: &[BodyDescriptor]) -> Result<ConfigId, StoreError> {
        self.insert(name, bodies, Utc::now())
    }

    pub fn summaries(&self) -> Vec<ConfigSummary> {
        self.configurations.iter().map(ConfigSummary::from).collect()
    }

    pub fn find(&self, id: &ConfigId) -> Result<SavedConfiguration, StoreError> {
        self.configurations
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::bodies::defaults::default_bodies;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(validate_name("  My Config ").unwrap(), "My Config");
        assert!(matches!(validate_name("   "), Err(StoreError::EmptyName)));
    }

    #[test]
    fn ids_are_unique_even_for_same_name_and_time() {
        let mut set = ConfigurationSet::new();
        let a = set.insert("Same", &default_bodies(), at(1_700_000_000)).unwrap();
        let b = set.insert("Same", &default_bodies(), at(1_700_000_000)).unwrap();
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn find_and_summaries() {
        let mut set = ConfigurationSet::new();
        let id = set.insert("First", &default_bodies(), at(10)).unwrap();
        set.insert("Second", &[], at(20)).unwrap();

        let found = set.find(&id).unwrap();
        assert_eq!(found.name, "First");
        assert_eq!(found.bodies, default_bodies());

        let names: Vec<_> = set.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["First", "Second"]);

        assert!(matches!(set.find(&ConfigId::from("nope")), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn document_round_trip_keeps_sequence() {
        let mut set = ConfigurationSet::new();
        set.insert("One", &default_bodies(), at(10)).unwrap();
        let json = set.to_json().unwrap();
        assert!(json.contains("\"createdAt\":\"1970-01-01T00:00:10Z\""));

        let mut restored = ConfigurationSet::from_json(&json).unwrap();
        assert_eq!(restored, set);
        let next = restored.insert("Two", &[], at(10)).unwrap();
        assert!(next.as_str().ends_with("-2"));
        assert!(ConfigurationSet::from_json("").unwrap().is_empty());
    }
}
