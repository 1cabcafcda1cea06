use std::io;
use std::path::Path;

use crate::error::{Result, TaskTreeError};
use crate::model::Task;
use crate::store::layout::child_dir_of;
use crate::store::order::reconcile;
use crate::store::TaskStore;

/// Loads the tasks of `dir` in display order.
///
/// With `recursive`, each task's `children` is filled from its child
/// directory, and the tasks found under `dir`'s trash are appended after the
/// live ones.
pub fn run(store: &TaskStore, dir: &Path, recursive: bool) -> Result<Vec<Task>> {
    let names = ordered_names(store, dir)?;

    let mut tasks = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let mut task = match store.read_task(&path) {
            Ok(task) => task,
            // Removed between listing and reading
            Err(TaskTreeError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("skipping vanished document {}", path.display());
                continue;
            }
            Err(e) => return Err(e),
        };
        if recursive && task.has_children {
            task.children = run(store, &child_dir_of(&path), true)?;
        }
        tasks.push(task);
    }

    if recursive {
        let trash = store.deleted_dir_of(dir);
        if trash.is_dir() {
            tasks.extend(run(store, &trash, true)?);
        }
    }

    Ok(tasks)
}

/// The reconciled order of `dir`. Newly found documents are written back to
/// the order record right away.
fn ordered_names(store: &TaskStore, dir: &Path) -> Result<Vec<String>> {
    let existing = store.list_documents(dir)?;
    let mut record = store.read_order(dir);
    let (effective, changed) = reconcile(&existing, &record.order);

    if changed {
        tracing::debug!("adopting unordered documents in {}", dir.display());
        record.order = effective.clone();
        store.write_order(dir, &mut record)?;
    }
    Ok(effective)
}
