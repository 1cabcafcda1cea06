//! Filesystem primitives used by the store.
//!
//! The store root may sit on a different device than its backing storage (a
//! memory-backed staging area mirrored elsewhere), so nothing here assumes a
//! rename can cross directories. Soft delete always copies then unlinks;
//! other moves try a rename first and fall back to copy+remove when the
//! kernel refuses with `CrossesDevices`.

use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

use crate::error::Result;

/// Writes `content` to `path` via a temp file in the same directory.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let tmp = dir.join(format!(".tmp-{}", Uuid::new_v4()));
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Copies a file and removes the source.
pub fn copy_then_unlink(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)?;
    fs::remove_file(from)?;
    Ok(())
}

/// Recursively copies a directory tree. Existing files at the destination are
/// overwritten.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copies a directory tree to `to` and removes the original. A missing source
/// is not an error.
pub fn copy_dir_then_remove(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Ok(());
    }
    copy_dir_recursive(from, to)?;
    remove_dir_if_exists(from)
}

/// Moves a file, falling back to copy+unlink across devices.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_unlink(from, to),
        Err(e) => Err(e.into()),
    }
}

/// Moves a directory tree, falling back to copy+remove across devices. A
/// missing source is not an error.
pub fn move_dir_if_exists(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Ok(());
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_dir_then_remove(from, to),
        Err(e) => Err(e.into()),
    }
}

pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
