//! # Document Codec
//!
//! Every task is a single markdown file with a fixed header block:
//!
//! ```text
//! ---
//! completed: false
//! title: Buy milk
//! priority: normal
//! dueDate:
//! status: Pending
//! created: 2024-05-01T09:30:00.000Z
//! ---
//!
//! # Buy milk
//!
//! Body text...
//! ```
//!
//! The key order and spelling are fixed: other tools (the remote mirror, people
//! with a text editor) read and write these files directly, so the format is the
//! integration contract.
//!
//! ## Parsing Is Lenient
//!
//! [`parse`] never fails. Keys are matched by literal prefix and each missing key
//! falls back to a default. Text without a header block is all body. When the
//! header has no `title:` the title comes from the first non-empty body line.
//!
//! ## Round Trip
//!
//! [`serialize`] injects a `# {title}` heading above the body; [`parse`] strips
//! it again (along with the blank lines after it), so
//! `parse(serialize(x))` gives back `x` with the body trimmed.

use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;

use crate::model::{status_for, Task, TaskFields, DEFAULT_PRIORITY};

const DELIMITER: &str = "---";

const KEY_COMPLETED: &str = "completed:";
const KEY_TITLE: &str = "title:";
const KEY_PRIORITY: &str = "priority:";
const KEY_DUE_DATE: &str = "dueDate:";
const KEY_STATUS: &str = "status:";
const KEY_CREATED: &str = "created:";

/// Current time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in milliseconds since the epoch, used to mint task ids.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Renders a task document.
pub fn serialize(fields: &TaskFields) -> String {
    let created = fields.created.clone().unwrap_or_else(now_iso);
    let header = [
        format!("{} {}", KEY_COMPLETED, fields.completed),
        format!("{} {}", KEY_TITLE, fields.title),
        format!("{} {}", KEY_PRIORITY, fields.priority),
        format!("{} {}", KEY_DUE_DATE, fields.due_date.as_deref().unwrap_or("")),
        format!("{} {}", KEY_STATUS, fields.status),
        format!("{} {}", KEY_CREATED, created),
    ];

    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    for line in &header {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push_str("\n\n");
    out.push_str(heading(&fields.title).trim_end());
    out.push('\n');

    if !fields.body.trim().is_empty() {
        out.push('\n');
        out.push_str(&fields.body);
        if !fields.body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Parses a task document. Location-derived fields (`file_path`,
/// `has_children`, `deleted`) are left for the store to fill in.
pub fn parse(text: &str, file_name: &str) -> Task {
    let (header, rest) = split_header(text);

    let mut completed = false;
    let mut title: Option<String> = None;
    let mut priority: Option<String> = None;
    let mut due_date: Option<String> = None;
    let mut status: Option<String> = None;
    let mut created: Option<String> = None;

    for line in header.iter().map(|l| l.trim_start()) {
        if let Some(value) = line.strip_prefix(KEY_COMPLETED) {
            completed = value.trim() == "true";
        } else if let Some(value) = line.strip_prefix(KEY_TITLE) {
            title = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(KEY_PRIORITY) {
            priority = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(KEY_DUE_DATE) {
            let value = value.trim();
            due_date = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        } else if let Some(value) = line.strip_prefix(KEY_STATUS) {
            status = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(KEY_CREATED) {
            created = Some(value.trim().to_string());
        }
    }

    let body_text = rest.trim();
    let title = title.unwrap_or_else(|| title_from_body(body_text));
    let body = strip_heading(body_text, &title);

    Task {
        id: id_from_file_name(file_name).unwrap_or_else(now_millis),
        title,
        body,
        completed,
        priority: priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        due_date,
        status: status.unwrap_or_else(|| status_for(completed).to_string()),
        created: created.unwrap_or_else(now_iso),
        file_name: file_name.to_string(),
        file_path: PathBuf::from(file_name),
        has_children: false,
        children: Vec::new(),
        deleted: false,
    }
}

/// Extracts the numeric prefix of `1712345678901-some-title.md`.
pub fn id_from_file_name(file_name: &str) -> Option<i64> {
    let digits_end = file_name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(file_name.len());
    if digits_end == 0 {
        return None;
    }
    match file_name[digits_end..].chars().next() {
        Some('-') | Some('_') => file_name[..digits_end].parse().ok(),
        _ => None,
    }
}

fn heading(title: &str) -> String {
    format!("# {}", title)
}

/// Splits `text` into header lines and everything after the closing delimiter.
/// Without a well-formed header block the whole text is returned as the rest.
fn split_header(text: &str) -> (Vec<&str>, String) {
    let trimmed = text.trim_start();
    let mut lines = trimmed.lines();

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return (Vec::new(), text.to_string()),
    }

    let mut header = Vec::new();
    while let Some(line) = lines.next() {
        if line.trim_end() == DELIMITER {
            let rest = lines.collect::<Vec<_>>().join("\n");
            return (header, rest);
        }
        header.push(line);
    }

    // No closing delimiter: not a header.
    (Vec::new(), text.to_string())
}

fn title_from_body(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .unwrap_or_default()
}

fn strip_heading(body: &str, title: &str) -> String {
    let mut lines = body.lines().peekable();
    let expected = heading(title);

    match lines.peek() {
        Some(first) if first.trim_end() == expected.trim_end() => {
            lines.next();
            while lines.peek().is_some_and(|line| line.trim().is_empty()) {
                lines.next();
            }
            lines.collect::<Vec<_>>().join("\n").trim().to_string()
        }
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{STATUS_COMPLETED, STATUS_PENDING};

    fn fields() -> TaskFields {
        TaskFields {
            title: "Buy milk".into(),
            completed: false,
            body: "Two litres, semi-skimmed.\n\n- corner shop\n- or the market".into(),
            priority: "high".into(),
            due_date: Some("2024-06-01".into()),
            status: STATUS_PENDING.into(),
            created: Some("2024-05-01T09:30:00.000Z".into()),
        }
    }

    #[test]
    fn serialize_writes_header_in_fixed_order() {
        let text = serialize(&fields());
        let expected = "---\n\
            completed: false\n\
            title: Buy milk\n\
            priority: high\n\
            dueDate: 2024-06-01\n\
            status: Pending\n\
            created: 2024-05-01T09:30:00.000Z\n\
            ---\n\
            \n\
            # Buy milk\n\
            \n\
            Two litres, semi-skimmed.\n\
            \n\
            - corner shop\n\
            - or the market\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn serialize_writes_empty_due_date() {
        let mut f = fields();
        f.due_date = None;
        let text = serialize(&f);
        assert!(text.contains("\ndueDate:\n"));
    }

    #[test]
    fn serialize_stamps_created_when_missing() {
        let mut f = fields();
        f.created = None;
        let task = parse(&serialize(&f), "1-buy-milk.md");
        assert!(chrono::DateTime::parse_from_rfc3339(&task.created).is_ok());
    }

    #[test]
    fn round_trip_preserves_fields() {
        let f = fields();
        let task = parse(&serialize(&f), "1714555800000-buy-milk.md");

        assert_eq!(task.id, 1714555800000);
        assert_eq!(task.title, f.title);
        assert_eq!(task.body, f.body);
        assert_eq!(task.completed, f.completed);
        assert_eq!(task.priority, f.priority);
        assert_eq!(task.due_date, f.due_date);
        assert_eq!(task.status, f.status);
        assert_eq!(Some(task.created), f.created);
    }

    #[test]
    fn round_trip_trims_body() {
        let mut f = fields();
        f.body = "\n\n  indented start\nend  \n\n\n".into();
        let task = parse(&serialize(&f), "1-x.md");
        assert_eq!(task.body, "indented start\nend");
    }

    #[test]
    fn round_trip_empty_body() {
        let mut f = fields();
        f.body = String::new();
        let task = parse(&serialize(&f), "1-x.md");
        assert_eq!(task.body, "");
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn round_trip_is_idempotent() {
        let first = parse(&serialize(&fields()), "1-x.md");
        let second = parse(&serialize(&first.fields()), "1-x.md");
        assert_eq!(first.body, second.body);
        assert_eq!(first.title, second.title);
    }

    #[test]
    fn body_keeps_heading_that_is_not_the_title() {
        let mut f = fields();
        f.body = "# Notes\n\ncontent".into();
        let task = parse(&serialize(&f), "1-x.md");
        assert_eq!(task.body, "# Notes\n\ncontent");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let text = "---\ntitle: Bare\n---\n\nsome body";
        let task = parse(text, "42-bare.md");

        assert_eq!(task.id, 42);
        assert!(!task.completed);
        assert_eq!(task.priority, "normal");
        assert_eq!(task.due_date, None);
        assert_eq!(task.status, STATUS_PENDING);
        assert!(!task.created.is_empty());
        assert_eq!(task.body, "some body");
    }

    #[test]
    fn missing_status_follows_completed() {
        let text = "---\ncompleted: true\ntitle: Done thing\n---\n";
        let task = parse(text, "1-done.md");
        assert!(task.completed);
        assert_eq!(task.status, STATUS_COMPLETED);
    }

    #[test]
    fn explicit_status_is_not_overridden_by_completed() {
        let text = "---\ncompleted: true\ntitle: Odd\nstatus: Pending\n---\n";
        let task = parse(text, "1-odd.md");
        assert!(task.completed);
        assert_eq!(task.status, STATUS_PENDING);
    }

    #[test]
    fn title_derived_from_first_body_line() {
        let text = "---\ncompleted: false\n---\n\n\n## Derived Title\n\nrest of body";
        let task = parse(text, "7-derived.md");
        assert_eq!(task.title, "Derived Title");
        assert_eq!(task.body, "## Derived Title\n\nrest of body");
    }

    #[test]
    fn title_derived_heading_is_stripped() {
        let text = "---\ncompleted: false\n---\n\n# Derived\n\n\nrest";
        let task = parse(text, "7-derived.md");
        assert_eq!(task.title, "Derived");
        assert_eq!(task.body, "rest");
    }

    #[test]
    fn text_without_header_is_all_body() {
        let text = "Plain note\nsecond line";
        let task = parse(text, "notes.md");
        assert_eq!(task.title, "Plain note");
        assert_eq!(task.body, "Plain note\nsecond line");
        assert_eq!(task.priority, "normal");
    }

    #[test]
    fn unterminated_header_is_body() {
        let text = "---\ntitle: Broken\nno closing";
        let task = parse(text, "1-broken.md");
        assert_eq!(task.title, "---");
        assert!(task.body.contains("title: Broken"));
    }

    #[test]
    fn id_from_file_name_requires_separator() {
        assert_eq!(id_from_file_name("1712345678901-buy-milk.md"), Some(1712345678901));
        assert_eq!(id_from_file_name("12_under.md"), Some(12));
        assert_eq!(id_from_file_name("12.md"), None);
        assert_eq!(id_from_file_name("notes.md"), None);
        assert_eq!(id_from_file_name("-1-x.md"), None);
    }

    #[test]
    fn id_falls_back_to_now() {
        let before = now_millis();
        let task = parse("---\ntitle: x\n---\n", "untitled.md");
        assert!(task.id >= before);
    }

    #[test]
    fn crlf_documents_parse() {
        let text = "---\r\ncompleted: true\r\ntitle: Windows\r\nstatus: Completed\r\n---\r\n\r\n# Windows\r\n\r\nbody\r\n";
        let task = parse(text, "3-windows.md");
        assert_eq!(task.title, "Windows");
        assert!(task.completed);
        assert_eq!(task.body, "body");
    }
}
