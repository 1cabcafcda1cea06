//! # Store Initialization
//!
//! Turns "where do my tasks live" into a ready [`TaskApi`].
//!
//! ## Root Resolution
//!
//! The store root is resolved in priority order:
//! 1. An explicit override (the CLI's `--root`).
//! 2. The `TASKTREE_ROOT` environment variable.
//! 3. `<data dir>/tasks`, where `<data dir>` is the OS-appropriate data
//!    directory from the `directories` crate.
//!
//! The root is created when missing.
//!
//! ## Configuration
//!
//! `tasktree.toml` is looked up in the global data directory and then in the
//! store root; both are merged, the root's file winning. See [`crate::config`].

use crate::api::TaskApi;
use crate::config::TaskTreeConfig;
use crate::error::{Result, TaskTreeError};
use crate::store::TaskStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const ROOT_ENV_VAR: &str = "TASKTREE_ROOT";
pub const CONFIG_FILE: &str = "tasktree.toml";

pub struct TaskTreeContext {
    pub api: TaskApi,
    pub config: TaskTreeConfig,
}

/// OS data directory for tasktree (config and default store live here).
pub fn global_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "tasktree", "tasktree")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TaskTreeError::Store("could not determine a data directory".into()))
}

/// Picks the store root: override, then environment, then the data directory.
pub fn resolve_root(root_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = root_override {
        return Ok(root);
    }
    if let Some(root) = std::env::var_os(ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    Ok(global_data_dir()?.join("tasks"))
}

/// Builds the API for a store root, loading configuration on the way.
pub fn initialize(root_override: Option<PathBuf>) -> Result<TaskTreeContext> {
    let root = resolve_root(root_override)?;

    let mut search_paths = Vec::new();
    if let Ok(global) = global_data_dir() {
        search_paths.push(SearchPath::Path(global));
    }
    search_paths.push(SearchPath::Path(root.clone()));

    let config: TaskTreeConfig = Clapfig::builder()
        .app_name("tasktree")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default();

    std::fs::create_dir_all(&root)?;
    tracing::debug!(
        "initialized store at {} (ext {})",
        root.display(),
        config.file_ext()
    );

    let store = TaskStore::new(root).with_layout(config.layout());
    Ok(TaskTreeContext {
        api: TaskApi::new(store),
        config,
    })
}
