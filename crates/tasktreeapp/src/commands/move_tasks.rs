use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskTreeError};
use crate::store::fs_ops::{move_dir_if_exists, move_file};
use crate::store::layout::{child_dir_of, same_directory};
use crate::store::{file_name_of, parent_of, TaskStore};

/// Makes the task at `path` a child of the task at `new_parent`.
///
/// When the task already lives under `new_parent` nothing moves on disk, but
/// its order entry still goes to the end of the sequence.
pub fn to_parent(store: &TaskStore, path: &Path, new_parent: &Path) -> Result<PathBuf> {
    let destination_dir = child_dir_of(new_parent);
    check_outside_subtree(path, &destination_dir)?;

    let current_dir = parent_of(path)?;
    if same_directory(&current_dir, &destination_dir) {
        let file_name = file_name_of(path)?;
        fs::metadata(path)?;
        store.update_order(&current_dir, |record| {
            let removed = record.remove(&file_name);
            record.append(&file_name) || removed
        })?;
        return Ok(path.to_path_buf());
    }
    move_into(store, path, &current_dir, &destination_dir)
}

/// Moves the task at `path` into the directory holding `target`. Ordering
/// within a shared directory is left to `reorder`, so that case is a no-op.
pub fn to_sibling(store: &TaskStore, path: &Path, target: &Path) -> Result<PathBuf> {
    let destination_dir = parent_of(target)?;
    check_outside_subtree(path, &destination_dir)?;

    let current_dir = parent_of(path)?;
    if same_directory(&current_dir, &destination_dir) {
        return Ok(path.to_path_buf());
    }
    move_into(store, path, &current_dir, &destination_dir)
}

/// A task cannot be moved into itself or below its own child directory.
fn check_outside_subtree(path: &Path, destination_dir: &Path) -> Result<()> {
    if destination_dir.starts_with(child_dir_of(path)) {
        return Err(TaskTreeError::InvalidMove(format!(
            "cannot move {} into its own subtree",
            path.display()
        )));
    }
    Ok(())
}

fn move_into(
    store: &TaskStore,
    path: &Path,
    current_dir: &Path,
    destination_dir: &Path,
) -> Result<PathBuf> {
    let file_name = file_name_of(path)?;
    let destination = destination_dir.join(&file_name);
    if destination.exists() {
        return Err(TaskTreeError::Conflict(destination));
    }
    // Fail before touching the destination when the source is gone.
    fs::metadata(path)?;

    fs::create_dir_all(destination_dir)?;
    move_file(path, &destination)?;
    move_dir_if_exists(&child_dir_of(path), &child_dir_of(&destination))?;

    store.update_order(current_dir, |record| record.remove(&file_name))?;
    store.update_order(destination_dir, |record| record.append(&file_name))?;

    tracing::info!(
        "moved task {} to {}",
        path.display(),
        destination.display()
    );
    Ok(destination)
}
