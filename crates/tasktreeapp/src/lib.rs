//! # tasktreeapp
//!
//! A hierarchical task store kept entirely in plain files. Every task is a
//! small markdown document; a task's children live in a directory named after
//! it; each directory carries a sidecar record of its display order; deleted
//! tasks go to a per-directory `.deleted` folder and can be brought back.
//!
//! ## Architecture
//!
//! ```text
//! UI (CLI) → TaskApi → commands/* → TaskStore → files
//! ```
//!
//! - [`api`]: the facade every client uses; resolves paths and dispatches.
//! - [`commands`]: one module per operation, where the logic lives.
//! - [`store`]: the on-disk layout, order records and file primitives.
//! - [`document`]: the text format of a single task.
//! - [`model`]: `Task`, partial updates, search hits and reports.
//! - [`config`] / [`init`]: settings and root resolution for real stores.
//!
//! ## Files Are the Database
//!
//! There is no index or cache. Anything can edit the tree (a text editor, a
//! sync tool, a crash halfway through a move) and the next load reconciles:
//! documents found on disk are adopted into the order, entries whose files are
//! gone are skipped.

pub mod api;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
