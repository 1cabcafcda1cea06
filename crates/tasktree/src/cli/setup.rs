use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tasktree", bin_name = "tasktree", version)]
#[command(about = "Hierarchical tasks kept in plain markdown files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store root (default: $TASKTREE_ROOT, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Task arguments are document paths, absolute or relative to the store root.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task
    #[command(alias = "n")]
    Create {
        title: String,

        /// Task body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Create the task under this task
        #[arg(short, long, value_name = "TASK")]
        parent: Option<PathBuf>,
    },

    /// List tasks as a tree, trashed ones last
    #[command(alias = "ls")]
    List {
        /// Directory or task whose children to list (default: root)
        dir: Option<PathBuf>,

        /// Only the given level, without children or trash
        #[arg(long)]
        flat: bool,
    },

    /// Show one task in full
    #[command(alias = "view")]
    Show { task: PathBuf },

    /// Change fields of a task
    Update {
        task: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        body: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        /// Due date (free-form, e.g. 2024-06-01)
        #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Free-form status; "Completed" also marks the task done
        #[arg(long)]
        status: Option<String>,

        /// Mark as completed
        #[arg(long, conflicts_with = "undone")]
        done: bool,

        /// Mark as pending
        #[arg(long)]
        undone: bool,
    },

    /// Move a task (and its subtree) to the trash
    #[command(alias = "rm")]
    Delete { task: PathBuf },

    /// Bring a trashed task back
    Restore { task: PathBuf },

    /// Remove a task and its subtree for good
    Purge { task: PathBuf },

    /// Move a task under another task, or next to it
    #[command(alias = "mv")]
    Move {
        task: PathBuf,

        /// New parent task
        #[arg(long, value_name = "TASK", conflicts_with = "beside", required_unless_present = "beside")]
        into: Option<PathBuf>,

        /// Task whose directory to move into
        #[arg(long, value_name = "TASK")]
        beside: Option<PathBuf>,
    },

    /// Replace the order of a directory with the given file names
    Reorder {
        dir: PathBuf,

        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Search titles and bodies
    Search {
        text: String,

        /// Directory or task to search under (default: root)
        dir: Option<PathBuf>,
    },

    /// Repair order records across the whole store
    Doctor,

    /// Permanently remove everything in a directory's trash
    EmptyTrash {
        /// Directory or task whose trash to empty (default: root)
        dir: Option<PathBuf>,
    },
}
