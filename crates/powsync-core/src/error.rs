//! Error types for the sync store
//!
//! Every network operation ends in one of these. Actions never propagate them
//! past their own boundary; they are recorded in the error log instead.

use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Failure of a sync operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// Request never reached the server, or no response came back
    #[error("transport failure: {0}")]
    Transport(String),

    /// Server rejected the request with a field-keyed body
    #[error("validation failed ({status}): {}", format_fields(.fields))]
    Validation {
        /// HTTP status code
        status: u16,
        /// Field name -> message
        fields: BTreeMap<String, String>,
    },

    /// Server answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Record could not be resolved in local state
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Collection searched
        kind: EntityKind,
        /// Name that was looked up
        name: String,
    },

    /// Response body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SyncError {
    /// Create not-found error
    #[inline]
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Classification of this error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Status { .. } => ErrorKind::Status,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Raised before any request left the client
    #[inline]
    #[must_use]
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Field-keyed messages, empty unless this is a validation failure
    #[must_use]
    pub fn fields(&self) -> BTreeMap<String, String> {
        match self {
            Self::Validation { fields, .. } => fields.clone(),
            _ => BTreeMap::new(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

fn format_fields(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network/transport failure
    Transport,
    /// 4xx with field-keyed body
    Validation,
    /// Other non-success status
    Status,
    /// Local name resolution failed
    NotFound,
    /// Undecodable response
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Validation => "validation",
            ErrorKind::Status => "status",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Decode => "decode",
        };
        f.write_str(label)
    }
}
