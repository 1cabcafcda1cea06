//! # Storage Layer
//!
//! [`TaskStore`] owns a root directory and knows how to read and write the two
//! kinds of files found in the tree: task documents and per-directory order
//! records. It holds no in-memory index; every call goes to disk.
//!
//! ## Philosophy
//!
//! - **Files are truth**: a document on disk is a task, whatever the order
//!   record says.
//! - **Order is intent**: the order record says how siblings should be shown.
//!   It is reconciled against the directory on every load.
//! - **No globals**: the root and the reserved names live on the store value,
//!   so several stores (and every test) can coexist in one process.
//!
//! ## Storage Layout
//!
//! See [`layout`] for the naming conventions. In short:
//!
//! ```text
//! <dir>/
//! ├── .order.json          # order record
//! ├── {id}-{slug}.md       # task document
//! ├── {id}-{slug}/         # that task's children
//! └── .deleted/            # soft-deleted tasks of <dir>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::document;
use crate::error::{Result, TaskTreeError};
use crate::model::{Task, TaskFields};

pub mod fs_ops;
pub mod layout;
pub mod order;

use layout::{child_dir_of, Layout};
use order::OrderRecord;

#[derive(Debug, Clone)]
pub struct TaskStore {
    root: PathBuf,
    layout: Layout,
}

impl TaskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: Layout::default(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Resolves a caller-supplied path: relative paths are taken from the root,
    /// and an empty path is the root itself.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() {
            self.root.clone()
        } else if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    // --- Order records ---

    pub fn order_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.layout.order_file())
    }

    pub fn read_order(&self, dir: &Path) -> OrderRecord {
        order::read(&self.order_path(dir))
    }

    pub fn write_order(&self, dir: &Path, record: &mut OrderRecord) -> Result<()> {
        order::write(&self.order_path(dir), record)
    }

    /// Read-modify-write of a directory's order record. `edit` returns whether
    /// it changed anything; unchanged records are not rewritten.
    pub fn update_order<F>(&self, dir: &Path, edit: F) -> Result<()>
    where
        F: FnOnce(&mut OrderRecord) -> bool,
    {
        let mut record = self.read_order(dir);
        if edit(&mut record) {
            self.write_order(dir, &mut record)?;
        }
        Ok(())
    }

    // --- Documents ---

    /// Document file names in `dir`, sorted by name so that enumeration order
    /// is stable across platforms. A missing directory has no documents.
    pub fn list_documents(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.layout.is_document(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reads and parses a document, filling in the location-derived fields.
    pub fn read_task(&self, path: &Path) -> Result<Task> {
        let file_name = file_name_of(path)?;
        let content = fs::read_to_string(path)?;

        let mut task = document::parse(&content, &file_name);
        task.file_path = path.to_path_buf();
        task.has_children = child_dir_of(path).is_dir();
        task.deleted = self.is_deleted(path);
        Ok(task)
    }

    /// Regenerates a document from `fields` and writes it atomically.
    pub fn write_task(&self, path: &Path, fields: &TaskFields) -> Result<()> {
        fs_ops::write_atomic(path, &document::serialize(fields))
    }

    /// Whether `path` is below a trash directory, judged relative to the root.
    pub fn is_deleted(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.layout.is_deleted(relative)
    }

    pub fn deleted_dir_of(&self, dir: &Path) -> PathBuf {
        self.layout.deleted_dir_of(dir)
    }

    /// Where a trashed document goes back to. Trash segments above the root
    /// are not considered.
    pub fn restore_destination(&self, path: &Path) -> Option<PathBuf> {
        match path.strip_prefix(&self.root) {
            Ok(relative) => self
                .layout
                .restore_destination(relative)
                .map(|dest| self.root.join(dest)),
            Err(_) => self.layout.restore_destination(path),
        }
    }
}

pub(crate) fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| TaskTreeError::InvalidPath(path.to_path_buf()))
}

pub(crate) fn parent_of(path: &Path) -> Result<PathBuf> {
    path.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| TaskTreeError::InvalidPath(path.to_path_buf()))
}
