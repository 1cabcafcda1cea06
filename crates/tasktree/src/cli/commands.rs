//! # CLI Layer
//!
//! This module is **one possible UI client** for tasktree. It is the only
//! place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Parses arguments
//! - Formats output for humans (or JSON with `--json`)
//!
//! ## Structure
//!
//! - `run()`: parse, initialize, dispatch
//! - `handle_*()`: per-command handlers that call `TaskApi` and print
//! - `print::*`: formatting

use super::print::{
    print_hits, print_info, print_report, print_success, print_task, print_tree, relative,
};
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use tasktreeapp::api::TaskApi;
use tasktreeapp::init::initialize;
use tasktreeapp::model::TaskUpdate;
use tasktreeapp::store::layout::child_dir_of;
use tracing::Level;

struct AppContext {
    api: TaskApi,
    json: bool,
}

impl AppContext {
    fn root(&self) -> &Path {
        self.api.root()
    }

    /// A directory argument may also name a task, meaning its children.
    fn listing_dir(&self, dir: Option<PathBuf>) -> PathBuf {
        let resolved = self.api.store().resolve(&dir.unwrap_or_default());
        if resolved.is_file() {
            child_dir_of(&resolved)
        } else {
            resolved
        }
    }

    fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn print_moved(&self, verb: &str, path: &Path) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "path": path }));
        }
        print_success(&format!("{} {}", verb, relative(path, self.root())));
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.root.clone()).context("could not open the task store")?;
    let ctx = AppContext {
        api: ctx.api,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Create {
            title,
            body,
            parent,
        }) => handle_create(&ctx, &title, &body, parent),
        Some(Commands::List { dir, flat }) => handle_list(&ctx, dir, flat),
        Some(Commands::Show { task }) => handle_show(&ctx, &task),
        Some(Commands::Update {
            task,
            title,
            body,
            priority,
            due,
            clear_due,
            status,
            done,
            undone,
        }) => {
            let mut update = TaskUpdate {
                title,
                body,
                priority,
                status,
                ..Default::default()
            };
            if let Some(due) = due {
                update.due_date = Some(Some(due));
            } else if clear_due {
                update.due_date = Some(None);
            }
            if done {
                update.completed = Some(true);
            } else if undone {
                update.completed = Some(false);
            }
            handle_update(&ctx, &task, &update)
        }
        Some(Commands::Delete { task }) => {
            let path = ctx.api.delete(&task)?;
            ctx.print_moved("Moved to trash:", &path)
        }
        Some(Commands::Restore { task }) => {
            let path = ctx.api.restore(&task)?;
            ctx.print_moved("Restored:", &path)
        }
        Some(Commands::Purge { task }) => handle_purge(&ctx, &task),
        Some(Commands::Move { task, into, beside }) => handle_move(&ctx, &task, into, beside),
        Some(Commands::Reorder { dir, names }) => handle_reorder(&ctx, dir, &names),
        Some(Commands::Search { text, dir }) => handle_search(&ctx, &text, dir),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::EmptyTrash { dir }) => handle_empty_trash(&ctx, dir),
        None => handle_list(&ctx, None, false),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_create(ctx: &AppContext, title: &str, body: &str, parent: Option<PathBuf>) -> Result<()> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }
    let task = match parent {
        Some(parent) => ctx.api.create_child(&parent, title, body)?,
        None => ctx.api.create("", title, body)?,
    };
    if ctx.json {
        return ctx.print_json(&task);
    }
    print_success(&format!(
        "Created: {}",
        relative(&task.file_path, ctx.root())
    ));
    Ok(())
}

fn handle_list(ctx: &AppContext, dir: Option<PathBuf>, flat: bool) -> Result<()> {
    let dir = ctx.listing_dir(dir);
    let tasks = ctx.api.load(&dir, !flat)?;
    if ctx.json {
        return ctx.print_json(&tasks);
    }
    print_tree(&tasks, ctx.root());
    Ok(())
}

fn handle_show(ctx: &AppContext, task: &Path) -> Result<()> {
    let task = ctx.api.get(task)?;
    if ctx.json {
        return ctx.print_json(&task);
    }
    print_task(&task, ctx.root());
    Ok(())
}

fn handle_update(ctx: &AppContext, task: &Path, update: &TaskUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("nothing to update (see `tasktree update --help`)");
    }
    let task = ctx.api.update(task, update)?;
    if ctx.json {
        return ctx.print_json(&task);
    }
    print_success(&format!("Updated: {}", task.title));
    Ok(())
}

fn handle_purge(ctx: &AppContext, task: &Path) -> Result<()> {
    ctx.api.permanently_delete(task)?;
    if ctx.json {
        return ctx.print_json(&json!({ "purged": ctx.api.store().resolve(task) }));
    }
    print_success(&format!("Permanently deleted: {}", task.display()));
    Ok(())
}

fn handle_move(
    ctx: &AppContext,
    task: &Path,
    into: Option<PathBuf>,
    beside: Option<PathBuf>,
) -> Result<()> {
    let (path, reparented) = match (into, beside) {
        (Some(parent), _) => (ctx.api.move_to_parent(task, &parent)?, true),
        (None, Some(target)) => (ctx.api.move_to_sibling(task, &target)?, false),
        (None, None) => bail!("either --into or --beside is required"),
    };
    if ctx.json {
        return ctx.print_json(&json!({ "path": path }));
    }
    if path == ctx.api.store().resolve(task) {
        if reparented {
            print_success("Already there, moved to the end of the list.");
        } else {
            print_info("Already there, nothing moved.");
        }
        return Ok(());
    }
    ctx.print_moved("Moved to", &path)
}

fn handle_reorder(ctx: &AppContext, dir: PathBuf, names: &[String]) -> Result<()> {
    let dir = ctx.listing_dir(Some(dir));
    ctx.api.reorder(&dir, names)?;
    if ctx.json {
        return ctx.print_json(&json!({ "dir": dir, "order": names }));
    }
    print_success(&format!("Reordered {} entries.", names.len()));
    Ok(())
}

fn handle_search(ctx: &AppContext, text: &str, dir: Option<PathBuf>) -> Result<()> {
    let dir = ctx.listing_dir(dir);
    let hits = ctx.api.search(&dir, text)?;
    if ctx.json {
        return ctx.print_json(&hits);
    }
    print_hits(&hits, ctx.root());
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let report = ctx.api.doctor("")?;
    if ctx.json {
        return ctx.print_json(&report);
    }
    print_report(&report, ctx.root());
    Ok(())
}

fn handle_empty_trash(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let dir = ctx.listing_dir(dir);
    let removed = ctx.api.empty_trash(&dir)?;
    if ctx.json {
        return ctx.print_json(&json!({ "removed": removed }));
    }
    if removed == 0 {
        print_info("Trash is already empty.");
    } else {
        print_success(&format!("Permanently deleted {} trashed task(s).", removed));
    }
    Ok(())
}
