//! # Configuration
//!
//! Tasktree configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `TASKTREE__FILE_EXT`, `TASKTREE__SLUG_MAX_LEN`.
//! 2. **Store Config**: `<root>/tasktree.toml`, next to the tasks it governs.
//! 3. **Global Config**: OS-appropriate data directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file_ext` | `.md` | Extension of task documents |
//! | `slug_max_len` | `50` | Longest title slug used in file names |
//!
//! The reserved names (`.deleted`, `.order.json`) are not configurable.

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::store::layout::{Layout, DEFAULT_FILE_EXT, DEFAULT_SLUG_MAX_LEN};

/// Configuration for tasktree, stored in `tasktree.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskTreeConfig {
    /// Extension of task documents (e.g. ".md", ".txt")
    #[config(default = ".md")]
    pub file_ext: String,

    /// Maximum length of the title slug in new file names
    #[config(default = 50)]
    pub slug_max_len: usize,
}

impl Default for TaskTreeConfig {
    fn default() -> Self {
        Self {
            file_ext: DEFAULT_FILE_EXT.to_string(),
            slug_max_len: DEFAULT_SLUG_MAX_LEN,
        }
    }
}

impl TaskTreeConfig {
    /// Get the file extension, normalized to start with a dot.
    pub fn file_ext(&self) -> String {
        if self.file_ext.starts_with('.') {
            self.file_ext.clone()
        } else {
            format!(".{}", self.file_ext)
        }
    }

    /// The store layout these settings describe.
    pub fn layout(&self) -> Layout {
        Layout::default()
            .with_file_ext(&self.file_ext())
            .with_slug_max_len(self.slug_max_len)
    }
}
