//! Task repository for CRUD operations on tasks
//!
//! Provides a repository pattern implementation for task operations,
//! encapsulating SurrealDB queries and providing a clean API.

use crate::error::{DbError, DbResult};
use crate::models::{Priority, Task};
use chrono::NaiveDate;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, trace};

/// Repository for task CRUD operations
pub struct TaskRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Update structure for partial task updates
///
/// Only fields that were explicitly set are written; an empty update is
/// a no-op. The due date distinguishes "leave alone" (`None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Default)]
pub struct TaskUpdate {
    /// New title (if Some)
    pub title: Option<String>,
    /// New due date; `Some(None)` clears it
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority (if Some)
    pub priority: Option<Priority>,
}

impl TaskUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clear the due date
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Set a new priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.title.is_some() || self.due_date.is_some() || self.priority.is_some()
    }
}

/// Minimal row for checking task existence
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

impl<'a> TaskRepository<'a> {
    /// Create a new TaskRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a task with the given record key exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let task: Option<IdOnly> = self
            .client
            .select(("task", id))
            .await
            .map_err(|e| DbError::Query(Box::new(e)))?;
        Ok(task.is_some())
    }

    /// Create a new task with the specified record key.
    ///
    /// All fields including `display_order` come from the task value;
    /// the creation and update timestamps are stamped by the store.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn create(&self, id: &str, task: &Task) -> DbResult<()> {
        debug!("Creating task: {} with title: {}", id, task.title);
        trace!("Task data: {:?}", task);

        let due_str = match &task.due_date {
            Some(due) => format!("\"{}\"", due.format("%Y-%m-%d")),
            None => "NONE".to_string(),
        };
        let parent_str = match &task.parent {
            Some(parent) => format!("\"{}\"", parent),
            None => "NONE".to_string(),
        };

        let title = task.title.clone();

        let query = format!(
            r#"CREATE task:{} SET
                title = $title,
                completed = {},
                due_date = {},
                priority = "{}",
                parent = {},
                display_order = {}"#,
            id,
            task.completed,
            due_str,
            task.priority.as_str(),
            parent_str,
            task.display_order
        );

        self.client
            .query(&query)
            .bind(("title", title))
            .await?
            .check()?;
        Ok(())
    }

    /// Get a task by record key.
    ///
    /// Returns `None` when no such task exists; absence is a normal
    /// result here, not an error.
    pub async fn get(&self, id: &str) -> DbResult<Option<Task>> {
        debug!("Fetching task: {}", id);
        let task: Option<Task> = self.client.select(("task", id)).await.map_err(|e| {
            debug!("Failed to fetch task: {}: {}", id, e);
            DbError::Query(Box::new(e))
        })?;
        Ok(task)
    }

    /// Apply partial updates to a task.
    ///
    /// Does nothing when the update carries no changes. The caller is
    /// responsible for checking existence first when absence should be
    /// surfaced to the user.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn update(&self, id: &str, updates: &TaskUpdate) -> DbResult<()> {
        debug!("Updating task: {}", id);
        trace!("Updates: {:?}", updates);

        if !updates.has_updates() {
            debug!("No updates specified for task: {}", id);
            return Ok(());
        }

        let mut field_updates = Vec::new();

        if let Some(title) = &updates.title {
            let escaped_title = title.replace('\"', "\\\"");
            field_updates.push(format!("title = \"{}\"", escaped_title));
        }

        if let Some(due_opt) = &updates.due_date {
            match due_opt {
                Some(due) => {
                    field_updates.push(format!("due_date = \"{}\"", due.format("%Y-%m-%d")))
                }
                None => field_updates.push("due_date = NONE".to_string()),
            }
        }

        if let Some(priority) = &updates.priority {
            field_updates.push(format!("priority = \"{}\"", priority.as_str()));
        }

        field_updates.push("updated_at = time::now()".to_string());

        let query = format!("UPDATE task:{} SET {}", id, field_updates.join(", "));
        trace!("Query: {}", query);
        self.client.query(&query).await?.check()?;

        Ok(())
    }

    /// Mark a task completed.
    ///
    /// Plain field update; the caller checks existence and current state
    /// when it wants to report them.
    pub async fn mark_completed(&self, id: &str) -> DbResult<()> {
        let query = format!(
            "UPDATE task:{} SET completed = true, updated_at = time::now()",
            id
        );
        self.client.query(&query).await?.check()?;
        Ok(())
    }

    /// Delete a task and its sub-tasks.
    ///
    /// Sub-tasks are owned by their parent and never outlive it: the
    /// children are removed in the same batch as the task itself.
    ///
    /// # Returns
    ///
    /// The number of sub-tasks removed along with the task.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn delete(&self, id: &str) -> DbResult<usize> {
        debug!("Deleting task: {} and its sub-tasks", id);

        let children_query = format!("SELECT id FROM task WHERE parent = \"{}\"", id);
        let mut result = self.client.query(&children_query).await?;
        let children: Vec<IdOnly> = result.take(0)?;
        let child_count = children.len();

        let query = format!("DELETE task WHERE parent = \"{}\";\nDELETE task:{}", id, id);
        self.client.query(&query).await?.check()?;

        debug!("Deleted task: {} ({} sub-tasks)", id, child_count);
        Ok(child_count)
    }
}
