use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::DoctorReport;
use crate::store::order::reconcile;
use crate::store::TaskStore;

/// Walks the tree below `dir`, trash included, and rewrites every order
/// record that does not match its directory.
///
/// Unlike `load`, which only adopts unordered documents, this also drops stale
/// and duplicate entries. Child directories with no matching document are
/// reported but left alone.
pub fn run(store: &TaskStore, dir: &Path) -> Result<DoctorReport> {
    let mut report = DoctorReport::default();
    if dir.is_dir() {
        check_dir(store, dir, &mut report)?;
    }
    report.orphan_directories.sort();
    Ok(report)
}

fn check_dir(store: &TaskStore, dir: &Path, report: &mut DoctorReport) -> Result<()> {
    report.directories_checked += 1;

    let existing = store.list_documents(dir)?;
    let mut record = store.read_order(dir);
    let (effective, _) = reconcile(&existing, &record.order);

    let recovered = effective.iter().filter(|n| !record.contains(n)).count();
    let kept = effective.len() - recovered;
    let stale = record.order.len() - kept;

    if effective != record.order {
        tracing::debug!(
            "repairing order of {}: {} recovered, {} stale",
            dir.display(),
            recovered,
            stale
        );
        record.order = effective;
        store.write_order(dir, &mut record)?;
    }
    report.recovered_entries += recovered;
    report.stale_entries_removed += stale;

    for sub in subdirectories(store, dir)? {
        let is_trash = sub.file_name().is_some_and(|n| n == store.layout().deleted_dir());
        if !is_trash && !has_document(store, &sub) {
            report.orphan_directories.push(sub.clone());
        }
        check_dir(store, &sub, report)?;
    }
    Ok(())
}

/// Child directories and the trash directory, sorted. Other hidden
/// directories are skipped.
fn subdirectories(store: &TaskStore, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') && name != store.layout().deleted_dir() {
            continue;
        }
        dirs.push(entry.path());
    }
    dirs.sort();
    Ok(dirs)
}

fn has_document(store: &TaskStore, child_dir: &Path) -> bool {
    let mut document = child_dir.as_os_str().to_owned();
    document.push(store.layout().file_ext());
    Path::new(&document).is_file()
}
