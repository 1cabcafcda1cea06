use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::document::{id_from_file_name, now_iso, now_millis};
use crate::error::Result;
use crate::model::{Task, TaskFields};
use crate::store::order::OrderRecord;
use crate::store::TaskStore;

/// Creates a task in `parent_dir` and slots it ahead of completed siblings.
pub fn run(store: &TaskStore, parent_dir: &Path, title: &str, body: &str) -> Result<Task> {
    fs::create_dir_all(parent_dir)?;

    let taken: HashSet<i64> = store
        .list_documents(parent_dir)?
        .iter()
        .filter_map(|name| id_from_file_name(name))
        .collect();

    // Ids are millisecond timestamps; bump past any sibling minted in the same tick.
    let mut id = now_millis();
    let (file_name, path) = loop {
        let name = store.layout().file_name_for(id, title);
        let path = parent_dir.join(&name);
        if !taken.contains(&id) && !path.exists() {
            break (name, path);
        }
        id += 1;
    };

    let mut fields = TaskFields::new(title, body);
    fields.created = Some(now_iso());
    store.write_task(&path, &fields)?;

    store.update_order(parent_dir, |record| {
        insert_ahead_of_completed(store, parent_dir, record, &file_name);
        true
    })?;

    tracing::info!("created task {}", path.display());
    store.read_task(&path)
}

/// Inserts `file_name` right before the first completed sibling, or at the end.
/// Siblings that cannot be read are not considered completed.
fn insert_ahead_of_completed(
    store: &TaskStore,
    dir: &Path,
    record: &mut OrderRecord,
    file_name: &str,
) {
    if record.contains(file_name) {
        return;
    }
    let first_completed = record.order.iter().position(|name| {
        store
            .read_task(&dir.join(name))
            .map(|task| task.completed)
            .unwrap_or(false)
    });
    match first_completed {
        Some(index) => record.order.insert(index, file_name.to_string()),
        None => record.order.push(file_name.to_string()),
    }
}
