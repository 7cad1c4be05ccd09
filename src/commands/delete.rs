//! Delete command for removing tasks
//!
//! Implements the `tpd delete` command. Sub-tasks are owned by their
//! parent and are removed with it.

use clap::Args;
use taskpad_db::{Database, DbError};

/// Delete a task and its sub-tasks
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Task id to delete
    #[arg(required = true)]
    pub id: String,
}

/// Result of the delete command execution
#[derive(Debug)]
pub struct DeleteResult {
    /// The task id that was targeted
    pub id: String,
    /// Whether the task existed
    pub existed: bool,
    /// Number of sub-tasks removed along with the task
    pub removed_subtasks: usize,
}

impl std::fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.existed {
            write!(f, "Task '{}' not found, nothing deleted", self.id)
        } else if self.removed_subtasks == 0 {
            write!(f, "Deleted task: {}", self.id)
        } else {
            write!(
                f,
                "Deleted task: {} ({} sub-task(s) removed with it)",
                self.id, self.removed_subtasks
            )
        }
    }
}

impl DeleteCommand {
    /// Execute the delete command.
    ///
    /// Deleting an id that does not exist is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn execute(&self, db: &Database) -> Result<DeleteResult, DbError> {
        if db.tasks().get(&self.id).await?.is_none() {
            return Ok(DeleteResult {
                id: self.id.clone(),
                existed: false,
                removed_subtasks: 0,
            });
        }

        let removed_subtasks = db.tasks().delete(&self.id).await?;

        Ok(DeleteResult {
            id: self.id.clone(),
            existed: true,
            removed_subtasks,
        })
    }
}
