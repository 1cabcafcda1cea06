//! # Command Layer
//!
//! Each operation on the tree lives in its own submodule as plain functions
//! taking a [`crate::store::TaskStore`]. Commands do the filesystem work and
//! keep order records in step; they never print, prompt or exit.
//!
//! ## Multi-step Mutations
//!
//! Structural commands touch several files (document, child directory, two
//! order records) with no transaction around them. The order is always:
//!
//! 1. Move or copy the document.
//! 2. Move or copy the child directory, when present.
//! 3. Update the order records.
//!
//! A crash between steps leaves the files in their new place and the order
//! record stale, which [`load`] repairs on the next read.
//!
//! ## Command Modules
//!
//! - [`create`]: New tasks, slotted ahead of completed siblings
//! - [`update`]: Partial field updates
//! - [`delete`]: Soft delete into `.deleted`
//! - [`restore`]: Bring a soft-deleted task back
//! - [`purge`]: Permanent removal, including emptying the trash
//! - [`move_tasks`]: Re-parent a task or move it next to another one
//! - [`reorder`]: Replace a directory's order
//! - [`load`]: Ordered, optionally recursive listing
//! - [`search`]: Substring search with ancestor breadcrumbs
//! - [`doctor`]: Repair every order record in a tree

pub mod create;
pub mod delete;
pub mod doctor;
pub mod load;
pub mod move_tasks;
pub mod purge;
pub mod reorder;
pub mod restore;
pub mod search;
pub mod update;
