use chrono::{DateTime, Utc};
use colored::Colorize;
use std::path::Path;
use tasktreeapp::model::{DoctorReport, SearchHit, Task};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const INDENT: &str = "  ";
const CRUMB_SEPARATOR: &str = " › ";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

/// Prints a loaded tree. Trashed tasks (appended after the live ones by a
/// recursive load) are shown at the depth they were found.
pub(super) fn print_tree(tasks: &[Task], root: &Path) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    let mut lines = Vec::new();
    collect_lines(tasks, 0, root, &mut lines);
    for line in lines {
        println!("{}", line);
    }
}

fn collect_lines(tasks: &[Task], depth: usize, root: &Path, out: &mut Vec<String>) {
    for task in tasks {
        out.push(task_line(task, depth, root));
        collect_lines(&task.children, depth + 1, root, out);
    }
}

fn task_line(task: &Task, depth: usize, root: &Path) -> String {
    let indent = INDENT.repeat(depth);
    let marker = if task.deleted {
        "[-]".red()
    } else if task.completed {
        "[x]".green()
    } else {
        "[ ]".normal()
    };

    let mut title = task.title.clone();
    if !task.completed && task.status != "Pending" && !task.status.is_empty() {
        title = format!("{} ({})", title, task.status);
    }

    // indent + marker + space + title + padding + time
    let fixed_width = indent.width() + 4 + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&title, available);
    let padding = available.saturating_sub(title_display.width());

    let title_colored = if task.deleted || task.completed {
        title_display.dimmed()
    } else {
        title_display.normal()
    };

    format!(
        "{}{} {}{}{}  {}",
        indent,
        marker,
        title_colored,
        " ".repeat(padding),
        format_time_ago(&task.created).dimmed(),
        relative(&task.file_path, root).dimmed()
    )
}

pub(super) fn print_task(task: &Task, root: &Path) {
    println!("{}", task.title.bold());
    println!("{}", "--------------------------------".dimmed());
    println!("{:<10}{}", "status:", task.status);
    println!("{:<10}{}", "priority:", task.priority);
    if let Some(due) = &task.due_date {
        println!("{:<10}{}", "due:", due.yellow());
    }
    println!(
        "{:<10}{} ({})",
        "created:",
        task.created,
        format_time_ago(&task.created).trim()
    );
    println!("{:<10}{}", "path:", relative(&task.file_path, root));
    if task.deleted {
        println!("{}", "in trash".red());
    }
    if !task.body.is_empty() {
        println!();
        println!("{}", task.body);
    }
}

pub(super) fn print_hits(hits: &[SearchHit], root: &Path) {
    if hits.is_empty() {
        println!("No matches.");
        return;
    }
    for hit in hits {
        let crumbs = if hit.breadcrumb.is_empty() {
            String::new()
        } else {
            format!("{}{}", hit.breadcrumb.join(CRUMB_SEPARATOR), CRUMB_SEPARATOR)
        };
        let title = if hit.task.deleted {
            format!("{} (deleted)", hit.task.title).red()
        } else {
            hit.task.title.bold()
        };
        println!(
            "{}{}  {}",
            crumbs.dimmed(),
            title,
            relative(&hit.task.file_path, root).dimmed()
        );
    }
}

pub(super) fn print_report(report: &DoctorReport, root: &Path) {
    println!("Checked {} directories.", report.directories_checked);
    if report.recovered_entries == 0 && report.stale_entries_removed == 0 {
        print_success("All order records are consistent.");
    } else {
        print_success(&format!(
            "Repaired order records: {} recovered, {} stale removed.",
            report.recovered_entries, report.stale_entries_removed
        ));
    }
    for dir in &report.orphan_directories {
        println!(
            "{} {}",
            "Orphan directory (no matching task):".yellow(),
            relative(dir, root)
        );
    }
}

/// `path` relative to the store root when it is inside it.
pub(super) fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(created: &str) -> String {
    let time_str = match DateTime::parse_from_rfc3339(created) {
        Ok(timestamp) => {
            let duration = Utc::now().signed_duration_since(timestamp.with_timezone(&Utc));
            Formatter::new().convert(duration.to_std().unwrap_or_default())
        }
        Err(_) => String::new(),
    };
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn task(title: &str) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            body: String::new(),
            completed: false,
            priority: "normal".to_string(),
            due_date: None,
            status: "Pending".to_string(),
            created: "2024-05-01T09:30:00.000Z".to_string(),
            file_name: "1-x.md".to_string(),
            file_path: PathBuf::from("/store/1-x.md"),
            has_children: false,
            children: Vec::new(),
            deleted: false,
        }
    }

    #[test]
    fn truncate_short_string_is_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let formatted = format_time_ago("2020-01-01T00:00:00.000Z");
        assert_eq!(formatted.width(), TIME_WIDTH.max(formatted.trim().width()));
        assert!(formatted.trim().ends_with("ago"));
    }

    #[test]
    fn time_ago_of_garbage_is_blank() {
        assert_eq!(format_time_ago("yesterday-ish").trim(), "");
    }

    #[test]
    fn relative_strips_root() {
        let root = Path::new("/store");
        assert_eq!(relative(Path::new("/store/1-a/2-b.md"), root), "1-a/2-b.md");
        assert_eq!(relative(Path::new("/elsewhere/x.md"), root), "/elsewhere/x.md");
    }

    #[test]
    fn task_line_shows_custom_status_and_path() {
        colored::control::set_override(false);
        let mut t = task("Write report");
        t.status = "Blocked".to_string();
        let line = task_line(&t, 1, Path::new("/store"));
        assert!(line.starts_with("  [ ] Write report (Blocked)"));
        assert!(line.ends_with("1-x.md"));
    }

    #[test]
    fn task_line_marks_completed_and_deleted() {
        colored::control::set_override(false);
        let mut done = task("Done");
        done.completed = true;
        done.status = "Completed".to_string();
        assert!(task_line(&done, 0, Path::new("/store")).starts_with("[x] Done "));

        let mut trashed = task("Gone");
        trashed.deleted = true;
        assert!(task_line(&trashed, 0, Path::new("/store")).starts_with("[-] Gone"));
    }
}
