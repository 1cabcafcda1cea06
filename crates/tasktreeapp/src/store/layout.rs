//! # On-Disk Layout
//!
//! The tree is encoded purely in names:
//!
//! ```text
//! root/
//! ├── .order.json                     # sibling order for root/
//! ├── 1714555800000-groceries.md      # a task
//! ├── 1714555800000-groceries/        # ...and its children
//! │   ├── .order.json
//! │   └── 1714555812345-buy-milk.md
//! └── .deleted/                       # soft-deleted tasks of root/
//!     ├── .order.json
//!     ├── 1714555900000-old-plan.md
//!     └── 1714555900000-old-plan/
//! ```
//!
//! Everything that turns a document path into "its children" or "its trash
//! location" lives here so the structural operations never hand-roll path
//! manipulation.

use std::path::{Component, Path, PathBuf};

pub const DELETED_DIR: &str = ".deleted";
pub const ORDER_FILE: &str = ".order.json";
pub const DEFAULT_FILE_EXT: &str = ".md";
pub const DEFAULT_SLUG_MAX_LEN: usize = 50;
const FALLBACK_SLUG: &str = "task";

/// Reserved names and naming rules for one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    file_ext: String,
    order_file: String,
    deleted_dir: String,
    slug_max_len: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            file_ext: DEFAULT_FILE_EXT.to_string(),
            order_file: ORDER_FILE.to_string(),
            deleted_dir: DELETED_DIR.to_string(),
            slug_max_len: DEFAULT_SLUG_MAX_LEN,
        }
    }
}

impl Layout {
    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn with_slug_max_len(mut self, len: usize) -> Self {
        self.slug_max_len = len.max(1);
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn order_file(&self) -> &str {
        &self.order_file
    }

    pub fn deleted_dir(&self) -> &str {
        &self.deleted_dir
    }

    /// Whether a directory entry name is a task document.
    pub fn is_document(&self, name: &str) -> bool {
        !name.starts_with('.') && name != self.order_file && name.ends_with(&self.file_ext)
    }

    /// `{id}-{slug}{ext}`
    pub fn file_name_for(&self, id: i64, title: &str) -> String {
        format!("{}-{}{}", id, slugify(title, self.slug_max_len), self.file_ext)
    }

    /// The trash directory that holds soft-deleted children of `dir`.
    pub fn deleted_dir_of(&self, dir: &Path) -> PathBuf {
        dir.join(&self.deleted_dir)
    }

    /// Whether `path` lives below a trash directory.
    pub fn is_deleted(&self, path: &Path) -> bool {
        path.components()
            .any(|c| c.as_os_str() == self.deleted_dir.as_str())
    }

    /// `path` with its last trash segment removed, or `None` when the path is
    /// not below a trash directory.
    pub fn restore_destination(&self, path: &Path) -> Option<PathBuf> {
        let components: Vec<Component> = path.components().collect();
        let position = components
            .iter()
            .rposition(|c| c.as_os_str() == self.deleted_dir.as_str())?;

        let mut destination = PathBuf::new();
        for (i, component) in components.iter().enumerate() {
            if i != position {
                destination.push(component.as_os_str());
            }
        }
        Some(destination)
    }
}

/// The directory that holds the children of the task stored at `document`.
///
/// `a/b/123-task.md` → `a/b/123-task`
pub fn child_dir_of(document: &Path) -> PathBuf {
    match (document.parent(), document.file_stem()) {
        (Some(parent), Some(stem)) => parent.join(stem),
        _ => document.with_extension(""),
    }
}

/// Filesystem-safe slug: lower-cased, non-alphanumeric runs collapsed to `-`,
/// trimmed, capped at `max_len` characters.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    let capped: String = slug.chars().take(max_len).collect();
    let capped = capped.trim_matches('-');
    if capped.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        capped.to_string()
    }
}

/// Compares two directories ignoring case, separator style and trailing
/// separators.
pub fn same_directory(a: &Path, b: &Path) -> bool {
    normalize_for_compare(a) == normalize_for_compare(b)
}

fn normalize_for_compare(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/").to_lowercase();
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() && !s.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_dir_strips_extension() {
        assert_eq!(
            child_dir_of(Path::new("/root/a/123-task.md")),
            PathBuf::from("/root/a/123-task")
        );
        assert_eq!(
            child_dir_of(Path::new("123-task.md")),
            PathBuf::from("123-task")
        );
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("Buy milk", 50), "buy-milk");
        assert_eq!(slugify("  Hello,   World!! ", 50), "hello-world");
        assert_eq!(slugify("C++ / Rust -- FFI", 50), "c-rust-ffi");
    }

    #[test]
    fn slugify_caps_length_without_trailing_separator() {
        assert_eq!(slugify("abcd efgh", 5), "abcd");
        assert_eq!(slugify(&"x".repeat(80), 50).len(), 50);
    }

    #[test]
    fn slugify_falls_back_when_empty() {
        assert_eq!(slugify("", 50), "task");
        assert_eq!(slugify("!!! ???", 50), "task");
        assert_eq!(slugify("日本語", 50), "task");
    }

    #[test]
    fn file_name_for_prefixes_id() {
        let layout = Layout::default();
        assert_eq!(layout.file_name_for(42, "Buy milk"), "42-buy-milk.md");
        let layout = Layout::default().with_file_ext("txt");
        assert_eq!(layout.file_name_for(42, "Buy milk"), "42-buy-milk.txt");
    }

    #[test]
    fn is_document_filters_reserved_and_hidden() {
        let layout = Layout::default();
        assert!(layout.is_document("1-a.md"));
        assert!(!layout.is_document(".order.json"));
        assert!(!layout.is_document(".hidden.md"));
        assert!(!layout.is_document("notes.txt"));
    }

    #[test]
    fn deleted_detection() {
        let layout = Layout::default();
        assert!(layout.is_deleted(Path::new("/r/.deleted/1-a.md")));
        assert!(layout.is_deleted(Path::new("/r/1-p/.deleted/1-a/2-b.md")));
        assert!(!layout.is_deleted(Path::new("/r/1-p/1-a.md")));
        assert!(!layout.is_deleted(Path::new("/r/x.deleted/1-a.md")));
    }

    #[test]
    fn restore_destination_removes_trash_segment() {
        let layout = Layout::default();
        assert_eq!(
            layout.restore_destination(Path::new("/r/.deleted/1-a.md")),
            Some(PathBuf::from("/r/1-a.md"))
        );
        assert_eq!(
            layout.restore_destination(Path::new("/r/1-p/.deleted/1-a/2-b.md")),
            Some(PathBuf::from("/r/1-p/1-a/2-b.md"))
        );
        assert_eq!(layout.restore_destination(Path::new("/r/1-a.md")), None);
    }

    #[test]
    fn same_directory_ignores_case_and_separators() {
        assert!(same_directory(Path::new("/Root/Tasks"), Path::new("/root/tasks/")));
        assert!(same_directory(
            Path::new("C:\\Data\\Tasks"),
            Path::new("c:/data/tasks")
        ));
        assert!(!same_directory(Path::new("/root/a"), Path::new("/root/b")));
    }
}
