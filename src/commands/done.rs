//! Done command for completing tasks
//!
//! Implements the `tpd done` command to mark a task as completed.

use clap::Args;
use taskpad_db::{Database, DbError};

/// Mark a task as completed
#[derive(Debug, Args)]
pub struct DoneCommand {
    /// Task id to complete
    #[arg(required = true)]
    pub id: String,
}

/// Result of the done command execution
#[derive(Debug)]
pub struct DoneResult {
    /// The task id that was completed
    pub id: String,
    /// Whether the task was already completed
    pub already_completed: bool,
}

impl std::fmt::Display for DoneResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.already_completed {
            write!(f, "Task '{}' is already completed", self.id)
        } else {
            write!(f, "Completed task: {}", self.id)
        }
    }
}

impl DoneCommand {
    /// Execute the done command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the task does not exist.
    pub async fn execute(&self, db: &Database) -> Result<DoneResult, DbError> {
        let task = db
            .tasks()
            .get(&self.id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                task_id: self.id.clone(),
            })?;

        if task.completed {
            return Ok(DoneResult {
                id: self.id.clone(),
                already_completed: true,
            });
        }

        db.tasks().mark_completed(&self.id).await?;

        Ok(DoneResult {
            id: self.id.clone(),
            already_completed: false,
        })
    }
}
