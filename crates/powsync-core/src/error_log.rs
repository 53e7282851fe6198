//! Append-only log of failed actions
//!
//! One entry per failed action, in order of occurrence. Entries are never
//! removed by the store; clearing is left to whoever renders them.

use crate::error::{ErrorKind, SyncError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Action that failed (e.g. `create_team`)
    pub action: String,
    /// Error classification
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Failing fields for validation errors
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    /// When the failure was recorded
    pub occurred_at: DateTime<Utc>,
}

impl ErrorEntry {
    /// Create entry from a sync error
    #[must_use]
    pub fn from_error(action: impl Into<String>, error: &SyncError) -> Self {
        Self {
            action: action.into(),
            kind: error.kind(),
            message: error.to_string(),
            fields: error.fields(),
            occurred_at: Utc::now(),
        }
    }
}

/// Ordered, append-only error capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    /// Create empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn append(&mut self, entry: ErrorEntry) {
        self.entries.push(entry);
    }

    /// Record `error` as a failure of `action`
    pub fn record(&mut self, action: &str, error: &SyncError) {
        self.append(ErrorEntry::from_error(action, error));
    }

    /// All entries, oldest first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Most recent entry
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&ErrorEntry> {
        self.entries.last()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
