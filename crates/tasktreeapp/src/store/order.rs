//! # Directory Order Index
//!
//! Directory enumeration order means nothing, so each directory carries a
//! sidecar record listing its documents in display order.
//!
//! The record is a cache of intent, not a mirror of the directory. It may list
//! files that are gone (a crash between a move and the index write, a sync
//! tool deleting files) and miss files that appeared (created by hand or by the
//! remote mirror). Readers always [`reconcile`] it against what is on disk.
//!
//! A missing or unreadable record is the same as an empty one: corruption is
//! never surfaced as an error, the next write simply replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::fs_ops::write_atomic;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Default for OrderRecord {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            order: Vec::new(),
            created: now,
            modified: now,
        }
    }
}

impl OrderRecord {
    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|n| n == name)
    }

    /// Appends `name` unless it is already listed. Returns whether it was added.
    pub fn append(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.order.push(name.to_string());
        true
    }

    /// Removes every occurrence of `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|n| n != name);
        self.order.len() != before
    }
}

/// Reads the record at `path`, falling back to a fresh one.
pub fn read(path: &Path) -> OrderRecord {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return OrderRecord::default(),
    };
    match serde_json::from_str(&content) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!("ignoring unreadable order record {}: {}", path.display(), e);
            OrderRecord::default()
        }
    }
}

/// Stamps `modified` and persists the record atomically.
pub fn write(path: &Path, record: &mut OrderRecord) -> Result<()> {
    record.modified = Utc::now();
    let content = serde_json::to_string_pretty(record)?;
    write_atomic(path, &content)
}

/// Merges the stored order with the files actually present.
///
/// Returns the effective order, stored entries that still exist (first
/// occurrence only) followed by unlisted files in enumeration order, and
/// whether any unlisted files were found.
pub fn reconcile(existing: &[String], stored: &[String]) -> (Vec<String>, bool) {
    let present: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(existing.len());
    let mut effective = Vec::with_capacity(existing.len());

    for name in stored {
        if present.contains(name.as_str()) && seen.insert(name.as_str()) {
            effective.push(name.clone());
        }
    }

    let mut changed = false;
    for name in existing {
        if seen.insert(name.as_str()) {
            effective.push(name.clone());
            changed = true;
        }
    }

    (effective, changed)
}
