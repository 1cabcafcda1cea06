use crate::model::TaskFields;
use crate::store::TaskStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub store: TaskStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = TaskStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// Writes a document directly, bypassing the order record.
    pub fn write_raw(&self, dir: &Path, file_name: &str, title: &str, completed: bool) -> PathBuf {
        let mut fields = TaskFields::new(title, "");
        fields.completed = completed;
        fields.status = crate::model::status_for(completed).to_string();
        let path = dir.join(file_name);
        self.store
            .write_task(&path, &fields)
            .expect("failed to write document");
        path
    }

    /// Snapshot of every file below `dir` as (relative path, content), sorted.
    pub fn snapshot(&self, dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        fn walk(base: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(base, &path, out);
                } else {
                    let rel = path.strip_prefix(base).unwrap().to_path_buf();
                    out.push((rel, std::fs::read(&path).unwrap()));
                }
            }
        }
        let mut out = Vec::new();
        walk(dir, dir, &mut out);
        out.sort();
        out
    }
}
