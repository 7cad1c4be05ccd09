//! Edit command for updating a task
//!
//! Implements the `tpd edit` command: partial updates to title, due
//! date, and priority. Manual ordering is never touched here; that is
//! the reorder command's job.

use chrono::NaiveDate;
use clap::Args;
use taskpad_db::{Database, DbError, Priority, TaskUpdate};

/// Update a task's title, due date, or priority
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Task id to update
    #[arg(required = true)]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// New priority (low, medium, high)
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
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

impl EditCommand {
    /// Execute the edit command.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - No update flags were given
    /// - The new title is blank
    /// - The task does not exist
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let updates = self.build_update()?;

        if !updates.has_updates() {
            return Err(DbError::ValidationError {
                message: "nothing to update; pass --title, --due, --clear-due, or --priority"
                    .to_string(),
            });
        }

        if db.tasks().get(&self.id).await?.is_none() {
            return Err(DbError::NotFound {
                task_id: self.id.clone(),
            });
        }

        db.tasks().update(&self.id, &updates).await?;

        Ok(self.id.clone())
    }

    /// Build the TaskUpdate from command options
    fn build_update(&self) -> Result<TaskUpdate, DbError> {
        let mut updates = TaskUpdate::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(DbError::ValidationError {
                    message: "title required".to_string(),
                });
            }
            updates = updates.with_title(title.clone());
        }

        if let Some(due) = self.due {
            updates = updates.with_due_date(due);
        } else if self.clear_due {
            updates = updates.clear_due_date();
        }

        if let Some(priority) = self.priority {
            updates = updates.with_priority(priority);
        }

        Ok(updates)
    }
}
