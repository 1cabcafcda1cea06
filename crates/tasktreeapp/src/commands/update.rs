use std::path::Path;

use crate::error::Result;
use crate::model::{Task, TaskUpdate};
use crate::store::TaskStore;

pub fn run(store: &TaskStore, path: &Path, update: &TaskUpdate) -> Result<Task> {
    let current = store.read_task(path)?;
    let fields = current.merged(update);
    store.write_task(path, &fields)?;
    tracing::info!("updated task {}", path.display());
    store.read_task(path)
}
