use std::fmt;
use serde::{Deserialize, Serialize};

/// Stable string identifier of a celestial body (e.g. "earth").
/// Unique within a body collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for BodyId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BodyId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

/// The body currently focused by the camera / UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No active selection.
    #[default]
    None,
    Body(BodyId),
}

impl Selection {
    pub fn body(&self) -> Option<&BodyId> {
        match self {
            Selection::None => None,
            Selection::Body(id) => Some(id),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// Events emitted by the engine for the host UI, drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The selection changed (by picking or by an explicit `select`).
    SelectionChanged(Selection),
    /// The scene binding was rebuilt for a new collection version.
    SceneRebuilt { version: u64, bodies: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_id_compares_with_str() {
        let id = BodyId::new("earth");
        assert_eq!(id, "earth");
        assert_eq!(id.to_string(), "earth");
    }

    #[test]
    fn selection_defaults_to_none() {
        let sel = Selection::default();
        assert!(sel.is_none());
        assert_eq!(sel.body(), None);
    }

    #[test]
    fn body_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&BodyId::new("mars")).unwrap();
        assert_eq!(json, "\"mars\"");
    }
}
