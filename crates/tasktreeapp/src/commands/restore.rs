use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskTreeError};
use crate::store::fs_ops::{move_dir_if_exists, move_file, remove_dir_if_exists};
use crate::store::layout::child_dir_of;
use crate::store::{file_name_of, parent_of, TaskStore};

/// Moves a soft-deleted task back out of the innermost trash directory on its
/// path and returns the restored location.
///
/// Children created under the live path after the delete are kept: the
/// restored children are merged in next to them and their order entries are
/// appended. A name present on both sides is a conflict and nothing moves.
pub fn run(store: &TaskStore, path: &Path) -> Result<PathBuf> {
    let destination = store
        .restore_destination(path)
        .ok_or_else(|| TaskTreeError::NotDeleted(path.to_path_buf()))?;
    if destination.exists() {
        return Err(TaskTreeError::Conflict(destination));
    }

    let source_children = child_dir_of(path);
    let destination_children = child_dir_of(&destination);
    let merge = source_children.is_dir() && destination_children.is_dir();
    if merge {
        if let Some(clash) = first_collision(store, &source_children, &destination_children)? {
            return Err(TaskTreeError::Conflict(clash));
        }
    }

    let file_name = file_name_of(path)?;
    let trash = parent_of(path)?;
    let destination_dir = parent_of(&destination)?;
    fs::create_dir_all(&destination_dir)?;

    move_file(path, &destination)?;
    if merge {
        merge_dir(store, &source_children, &destination_children)?;
    } else {
        move_dir_if_exists(&source_children, &destination_children)?;
    }

    store.update_order(&trash, |record| record.remove(&file_name))?;
    store.update_order(&destination_dir, |record| record.append(&file_name))?;

    tracing::info!("restored task {}", destination.display());
    Ok(destination)
}

/// First path under `to` that an entry of `from` would land on, descending
/// into directories present on both sides. Order records do not count.
fn first_collision(store: &TaskStore, from: &Path, to: &Path) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        if entry.file_name() == store.layout().order_file() {
            continue;
        }
        let target = to.join(entry.file_name());
        if !target.exists() {
            continue;
        }
        if entry.file_type()?.is_dir() && target.is_dir() {
            if let Some(clash) = first_collision(store, &entry.path(), &target)? {
                return Ok(Some(clash));
            }
        } else {
            return Ok(Some(target));
        }
    }
    Ok(None)
}

/// Moves every entry of `from` into `to` and appends `from`'s order entries to
/// `to`'s order record, then removes `from`.
fn merge_dir(store: &TaskStore, from: &Path, to: &Path) -> Result<()> {
    let incoming = store.read_order(from).order;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        if entry.file_name() == store.layout().order_file() {
            continue;
        }
        let source = entry.path();
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            if target.is_dir() {
                merge_dir(store, &source, &target)?;
            } else {
                move_dir_if_exists(&source, &target)?;
            }
        } else {
            move_file(&source, &target)?;
        }
    }

    store.update_order(to, |record| {
        incoming
            .iter()
            .fold(false, |changed, name| record.append(name) || changed)
    })?;
    tracing::debug!("merged {} into {}", from.display(), to.display());
    remove_dir_if_exists(from)
}
