//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every tasktree operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: every path argument may be absolute or relative to
//!   the store root, and the empty path means the root itself
//! - **Returns structured types**: tasks, paths and reports, never strings
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: No stdout, stderr or formatting
//!
//! ## Testing Strategy
//!
//! API tests check that paths are resolved and the right command runs.
//! Command behavior is tested in the command modules.

use std::path::{Path, PathBuf};

use crate::commands;
use crate::error::Result;
use crate::model::{DoctorReport, SearchHit, Task, TaskUpdate};
use crate::store::layout::child_dir_of;
use crate::store::TaskStore;

/// The main API facade for tasktree operations.
pub struct TaskApi {
    store: TaskStore,
}

impl TaskApi {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.store.resolve(path.as_ref())
    }

    /// Creates a task in `parent_dir`.
    pub fn create(&self, parent_dir: impl AsRef<Path>, title: &str, body: &str) -> Result<Task> {
        commands::create::run(&self.store, &self.resolve(parent_dir), title, body)
    }

    /// Creates a task under the task stored at `parent`.
    pub fn create_child(&self, parent: impl AsRef<Path>, title: &str, body: &str) -> Result<Task> {
        let dir = child_dir_of(&self.resolve(parent));
        commands::create::run(&self.store, &dir, title, body)
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Result<Task> {
        self.store.read_task(&self.resolve(path))
    }

    pub fn update(&self, path: impl AsRef<Path>, update: &TaskUpdate) -> Result<Task> {
        commands::update::run(&self.store, &self.resolve(path), update)
    }

    /// Soft delete. Returns the document's location in the trash.
    pub fn delete(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        commands::delete::run(&self.store, &self.resolve(path))
    }

    /// Returns the document's restored location.
    pub fn restore(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        commands::restore::run(&self.store, &self.resolve(path))
    }

    pub fn permanently_delete(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::purge::run(&self.store, &self.resolve(path))
    }

    pub fn move_to_parent(
        &self,
        path: impl AsRef<Path>,
        new_parent: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        commands::move_tasks::to_parent(&self.store, &self.resolve(path), &self.resolve(new_parent))
    }

    pub fn move_to_sibling(
        &self,
        path: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        commands::move_tasks::to_sibling(&self.store, &self.resolve(path), &self.resolve(target))
    }

    pub fn reorder(&self, dir: impl AsRef<Path>, names: &[String]) -> Result<()> {
        commands::reorder::run(&self.store, &self.resolve(dir), names)
    }

    pub fn load(&self, dir: impl AsRef<Path>, recursive: bool) -> Result<Vec<Task>> {
        commands::load::run(&self.store, &self.resolve(dir), recursive)
    }

    pub fn search(&self, dir: impl AsRef<Path>, text: &str) -> Result<Vec<SearchHit>> {
        commands::search::run(&self.store, &self.resolve(dir), text)
    }

    pub fn doctor(&self, dir: impl AsRef<Path>) -> Result<DoctorReport> {
        commands::doctor::run(&self.store, &self.resolve(dir))
    }

    /// Empties `dir`'s trash. Returns the number of tasks removed.
    pub fn empty_trash(&self, dir: impl AsRef<Path>) -> Result<usize> {
        commands::purge::empty_trash(&self.store, &self.resolve(dir))
    }
}
