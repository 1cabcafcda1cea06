use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskTreeError};
use crate::store::fs_ops::{copy_dir_then_remove, copy_then_unlink};
use crate::store::layout::child_dir_of;
use crate::store::{file_name_of, parent_of, TaskStore};

/// Soft-deletes the task at `path` into its parent's trash directory and
/// returns the document's new location.
///
/// Files are copied then unlinked rather than renamed, so the trash may sit
/// on another volume. A trashed document with the same name is never
/// overwritten.
pub fn run(store: &TaskStore, path: &Path) -> Result<PathBuf> {
    if store.is_deleted(path) {
        return Err(TaskTreeError::AlreadyDeleted(path.to_path_buf()));
    }

    let file_name = file_name_of(path)?;
    let parent = parent_of(path)?;
    let trash = store.deleted_dir_of(&parent);
    let target = trash.join(&file_name);
    if target.exists() {
        return Err(TaskTreeError::Conflict(target));
    }
    fs::create_dir_all(&trash)?;

    copy_then_unlink(path, &target)?;
    copy_dir_then_remove(&child_dir_of(path), &child_dir_of(&target))?;

    store.update_order(&parent, |record| record.remove(&file_name))?;
    store.update_order(&trash, |record| record.append(&file_name))?;

    tracing::info!("deleted task {}", path.display());
    Ok(target)
}
