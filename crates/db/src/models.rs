//! Data models for Taskpad task management
//!
//! Defines Rust types that map to the SurrealDB schema for tasks,
//! plus the due-date bucket checks used by listing filters and display.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Task priority level
///
/// Every task carries a priority; when the user does not pick one the
/// add commands resolve it to `Medium` at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the string representation used in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task in the Taskpad task list
///
/// Tasks form at most one level of hierarchy: a task either is top-level
/// (`parent` is `None`) or is a sub-task of a top-level task. Manual
/// ordering is carried by `display_order`, scoped per parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (SurrealDB record ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    /// Task title
    pub title: String,

    /// Whether the task has been completed
    #[serde(default)]
    pub completed: bool,

    /// Optional due date (calendar date, no time component)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Priority, always present once the task is constructed
    pub priority: Priority,

    /// Record key of the parent task; `None` means top-level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Manual ordering index, 0-based within the parent scope
    #[serde(default)]
    pub display_order: i64,

    /// Creation timestamp, set once by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new pending task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            completed: false,
            due_date: None,
            priority: Priority::Medium,
            parent: None,
            display_order: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the due date of this task
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the priority of this task
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Mark this task as a sub-task of the given parent
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the manual ordering index
    pub fn with_display_order(mut self, order: i64) -> Self {
        self.display_order = order;
        self
    }

    /// Mark this task completed
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// The record key portion of the task id, if the task is persisted
    pub fn record_key(&self) -> Option<String> {
        self.id.as_ref().map(|thing| thing.id.to_string())
    }

    /// Whether the task is past its due date.
    ///
    /// Completed tasks are never overdue; tasks without a due date are
    /// never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due < today,
            _ => false,
        }
    }

    /// Whether the task is due exactly today.
    ///
    /// Evaluated regardless of completion, matching the listing filter.
    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        self.due_date == Some(today)
    }

    /// Whether the task is due within the next `days` days.
    ///
    /// The window is inclusive on both ends: `today` through
    /// `today + days`. Completed tasks and tasks without a due date
    /// report false.
    pub fn is_due_within_days(&self, today: NaiveDate, days: i64) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due >= today && due <= today + Duration::days(days),
            _ => false,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.completed == other.completed
            && self.due_date == other.due_date
            && self.priority == other.priority
            && self.parent == other.parent
            && self.display_order == other.display_order
    }
}

impl Eq for Task {}
