use std::path::Path;

use crate::error::Result;
use crate::model::{SearchHit, Task};
use crate::store::TaskStore;

use super::load;

/// Case-insensitive substring search over titles and bodies below `dir`,
/// trashed tasks included. Hits come back in depth-first display order.
pub fn run(store: &TaskStore, dir: &Path, text: &str) -> Result<Vec<SearchHit>> {
    let tasks = load::run(store, dir, true)?;
    let needle = text.to_lowercase();

    let mut hits = Vec::new();
    let mut trail = Vec::new();
    collect(&tasks, &needle, &mut trail, &mut hits);
    Ok(hits)
}

fn collect(tasks: &[Task], needle: &str, trail: &mut Vec<String>, hits: &mut Vec<SearchHit>) {
    for task in tasks {
        if is_match(task, needle) {
            hits.push(SearchHit {
                task: task.without_children(),
                breadcrumb: trail.clone(),
            });
        }
        if !task.children.is_empty() {
            trail.push(task.title.clone());
            collect(&task.children, needle, trail, hits);
            trail.pop();
        }
    }
}

fn is_match(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.body.to_lowercase().contains(needle)
}
