//! Add command for creating new tasks and sub-tasks
//!
//! Implements the `tpd add` command. With `--parent` the new task joins
//! the parent's sub-task sequence; without it, the top-level sequence.

use crate::id::IdGenerator;
use chrono::NaiveDate;
use clap::Args;
use taskpad_db::{Database, DbError, Priority, Task};

/// Create a new task
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Title of the task
    #[arg(required = true)]
    pub title: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    /// Priority (low, medium, high); defaults to medium
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// Parent task id (creates a sub-task)
    #[arg(long)]
    pub parent: Option<String>,
}

/// Parse a date string in ISO format
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Parse a priority string into a Priority enum
fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority '{}'. Valid values: low, medium, high", s))
}

impl AddCommand {
    /// Execute the add command.
    ///
    /// Creates a new task at the end of its sibling sequence and stores
    /// it in the database. The priority defaults to medium here, when
    /// the task is constructed, never later.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Returns
    ///
    /// The record key of the new task.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The title is blank
    /// - The parent task doesn't exist
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        if self.title.trim().is_empty() {
            return Err(DbError::ValidationError {
                message: "title required".to_string(),
            });
        }

        // Validate parent exists if specified
        if let Some(parent_id) = &self.parent
            && db.tasks().get(parent_id).await?.is_none()
        {
            return Err(DbError::NotFound {
                task_id: parent_id.clone(),
            });
        }

        // The new task appends to its sibling sequence
        let display_order = db
            .orders()
            .next_display_order(self.parent.as_deref())
            .await?;

        let id = self.generate_unique_id(db).await?;

        let mut task = Task::new(self.title.clone())
            .with_priority(self.priority.unwrap_or(Priority::Medium))
            .with_display_order(display_order);

        if let Some(due) = self.due {
            task = task.with_due_date(due);
        }

        if let Some(parent_id) = &self.parent {
            task = task.with_parent(parent_id.clone());
        }

        db.tasks().create(&id, &task).await?;

        Ok(id)
    }

    /// Generate a unique record key that doesn't collide with existing tasks.
    async fn generate_unique_id(&self, db: &Database) -> Result<String, DbError> {
        let mut generator = IdGenerator::new(&self.title);

        while let Some(id) = generator.next_id() {
            if !db.tasks().exists(&id).await? {
                return Ok(id);
            }
        }

        Err(DbError::ValidationError {
            message: "failed to generate unique task id after maximum retries".to_string(),
        })
    }
}
