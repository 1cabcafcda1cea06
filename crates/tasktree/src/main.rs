//! # Tasktree CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/tasktreeapp/`: the library, UI-agnostic store and operations
//! - `crates/tasktree/`: this CLI, depends on `tasktreeapp`
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/tasktree/src/cli/)                │
//! │  - clap argument parsing (setup.rs)                  │
//! │  - dispatch and context wiring (commands.rs)         │
//! │  - terminal rendering (print.rs)                     │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────┐
//! │  API Layer (crates/tasktreeapp/src/api.rs)           │
//! │  - resolves paths against the store root             │
//! │  - dispatches to command modules                     │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────┐
//! │  Command Layer (crates/tasktreeapp/src/commands/*)   │
//! │  - file moves, order records, reconciliation         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument
//! parsing, logging setup, rendering, error messages and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
