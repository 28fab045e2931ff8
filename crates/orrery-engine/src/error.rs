use thiserror::Error;

/// Rejected mutations of the body collection.
///
/// Malformed descriptors are caught here, at mutation time, so the scene
/// builder never sees them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown body: {0}")]
    UnknownBody(String),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("property {property} expects a {expected} value")]
    WrongType {
        property: &'static str,
        expected: &'static str,
    },

    #[error("invalid {property} for {body}: {reason}")]
    InvalidValue {
        body: String,
        property: &'static str,
        reason: String,
    },

    #[error("duplicate body id: {0}")]
    DuplicateId(String),

    #[error("expected exactly one central body, found {0}")]
    CentralBodyCount(usize),

    #[error("body collection is empty")]
    Empty,
}

/// Engine lifecycle and precondition failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no mountable container (width={width}, height={height})")]
    NoContainer { width: f32, height: f32 },

    #[error("engine is not mounted")]
    NotMounted,

    #[error("engine is already mounted")]
    AlreadyMounted,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration store: {0}")]
    Store(String),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e.to_string())
    }
}

/// Failures reported by a configuration store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("configuration not found: {0}")]
    NotFound(String),

    #[error("configuration name must not be empty")]
    EmptyName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_wraps_into_engine_error() {
        let err: EngineError = RegistryError::UnknownBody("pluto".into()).into();
        assert_eq!(err.to_string(), "unknown body: pluto");
    }

    #[test]
    fn invalid_value_message_names_body_and_property() {
        let err = RegistryError::InvalidValue {
            body: "mars".into(),
            property: "radius",
            reason: "must be positive".into(),
        };
        assert_eq!(err.to_string(), "invalid radius for mars: must be positive");
    }

    #[test]
    fn store_error_keeps_message_in_engine_error() {
        let err: EngineError = StoreError::NotFound("cfg-1".into()).into();
        assert_eq!(err, EngineError::Store("configuration not found: cfg-1".into()));
    }
}
