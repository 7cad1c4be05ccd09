//! Output formatting module for Taskpad
//!
//! Provides table formatting and display utilities for CLI output.

use chrono::{Local, NaiveDate};
use taskpad_db::Task;

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 40;

/// Days ahead a pending task counts as due soon in the table
const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

/// Format the status column of a task
fn status_cell(task: &Task) -> &'static str {
    if task.completed { "done" } else { "pending" }
}

/// Format the due-date column of a task.
///
/// Overdue tasks are marked with `!`, tasks due within the next week
/// with `*`; completed tasks get neither marker.
fn due_cell(task: &Task, today: NaiveDate) -> String {
    match task.due_date {
        Some(due) => {
            let date = due.format("%Y-%m-%d");
            if task.is_overdue(today) {
                format!("{} !", date)
            } else if task.is_due_within_days(today, DUE_SOON_WINDOW_DAYS) {
                format!("{} *", date)
            } else {
                date.to_string()
            }
        }
        None => "-".to_string(),
    }
}

/// Format tasks into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID      Status   Priority  Due           Title
/// ------  -------  --------  ------------  -----------------
/// kcmepb  pending  high      2025-06-01 *  Write the report
/// ```
pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Status", "Priority", "Due", "Title"];
    let today = Local::now().date_naive();

    let ids: Vec<String> = tasks
        .iter()
        .map(|t| t.record_key().unwrap_or_else(|| "-".to_string()))
        .collect();
    let dues: Vec<String> = tasks.iter().map(|t| due_cell(t, today)).collect();
    let titles: Vec<String> = tasks
        .iter()
        .map(|t| truncate(&t.title, MAX_TITLE_WIDTH))
        .collect();

    let id_width = ids
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .max(headers[0].len());

    let status_width = tasks
        .iter()
        .map(|t| status_cell(t).len())
        .max()
        .unwrap_or(0)
        .max(headers[1].len());

    let priority_width = tasks
        .iter()
        .map(|t| t.priority.as_str().len())
        .max()
        .unwrap_or(0)
        .max(headers[2].len());

    let due_width = dues
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .max(headers[3].len());

    let title_width = titles
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .max(headers[4].len());

    let mut output = String::new();

    output.push_str(&format!(
        "{:<id_w$}  {:<status_w$}  {:<priority_w$}  {:<due_w$}  {:<title_w$}\n",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        id_w = id_width,
        status_w = status_width,
        priority_w = priority_width,
        due_w = due_width,
        title_w = title_width,
    ));

    output.push_str(&format!(
        "{:->id_w$}  {:->status_w$}  {:->priority_w$}  {:->due_w$}  {:->title_w$}\n",
        "",
        "",
        "",
        "",
        "",
        id_w = id_width,
        status_w = status_width,
        priority_w = priority_width,
        due_w = due_width,
        title_w = title_width,
    ));

    for (i, task) in tasks.iter().enumerate() {
        output.push_str(&format!(
            "{:<id_w$}  {:<status_w$}  {:<priority_w$}  {:<due_w$}  {:<title_w$}\n",
            ids[i],
            status_cell(task),
            task.priority.as_str(),
            dues[i],
            titles[i],
            id_w = id_width,
            status_w = status_width,
            priority_w = priority_width,
            due_w = due_width,
            title_w = title_width,
        ));
    }

    output
}
