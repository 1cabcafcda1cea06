use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::store::fs_ops::remove_dir_if_exists;
use crate::store::layout::child_dir_of;
use crate::store::{file_name_of, parent_of, TaskStore};

/// Removes a task and its subtree for good, live or trashed.
pub fn run(store: &TaskStore, path: &Path) -> Result<()> {
    let file_name = file_name_of(path)?;
    let parent = parent_of(path)?;

    fs::remove_file(path)?;
    remove_dir_if_exists(&child_dir_of(path))?;
    store.update_order(&parent, |record| record.remove(&file_name))?;

    tracing::info!("permanently deleted task {}", path.display());
    Ok(())
}

/// Removes `dir`'s trash directory. Returns how many trashed tasks it held at
/// its top level.
pub fn empty_trash(store: &TaskStore, dir: &Path) -> Result<usize> {
    let trash = store.deleted_dir_of(dir);
    if !trash.is_dir() {
        return Ok(0);
    }

    let count = store.list_documents(&trash)?.len();
    remove_dir_if_exists(&trash)?;

    tracing::info!("emptied trash {} ({} tasks)", trash.display(), count);
    Ok(count)
}
