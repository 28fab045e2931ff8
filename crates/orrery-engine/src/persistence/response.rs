//! `{success, ...}` envelopes returned across the web bridge.

use serde::Serialize;

use super::store::{ConfigId, ConfigSummary};
use crate::bodies::descriptor::BodyDescriptor;
use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoreResponse {
    Saved { success: bool, id: ConfigId },
    Listed { success: bool, configurations: Vec<ConfigSummary> },
    Fetched { success: bool, bodies: Vec<BodyDescriptor> },
    Failed { success: bool, error: String },
}

impl StoreResponse {
    pub fn saved(id: ConfigId) -> Self {
        StoreResponse::Saved { success: true, id }
    }

    pub fn listed(configurations: Vec<ConfigSummary>) -> Self {
        StoreResponse::Listed {
            success: true,
            configurations,
        }
    }

    pub fn fetched(bodies: Vec<BodyDescriptor>) -> Self {
        StoreResponse::Fetched { success: true, bodies }
    }

    pub fn failed(error: impl ToString) -> Self {
        StoreResponse::Failed {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, StoreResponse::Failed { .. })
    }

    /// Collapse a store result into an envelope.
    pub fn from_result<T>(result: Result<T, StoreError>, ok: impl FnOnce(T) -> Self) -> Self {
        match result {
            Ok(value) => ok(value),
            Err(e) => {
                log::warn!("store: {}", e);
                Self::failed(e)
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"{}"}}"#, e.to_string().replace('"', "'"))
        })
    }
}
