//! CLI commands for Taskpad
//!
//! This module contains all subcommand implementations for the tpd CLI.

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod reorder;
pub mod show;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use done::DoneCommand;
pub use edit::EditCommand;
pub use list::ListCommand;
pub use reorder::ReorderCommand;
pub use show::ShowCommand;

use crate::output;
use clap::Subcommand;
use taskpad_db::{Database, DbError};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new task or sub-task
    Add(AddCommand),
    /// List top-level tasks with filters and sorting
    List(ListCommand),
    /// Show a task and its sub-tasks
    Show(ShowCommand),
    /// Update a task's title, due date, or priority
    Edit(EditCommand),
    /// Mark a task as completed
    Done(DoneCommand),
    /// Delete a task and its sub-tasks
    Delete(DeleteCommand),
    /// Re-sequence tasks into the given manual order
    Reorder(ReorderCommand),
}

impl Command {
    /// Execute the command with the given database connection.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    ///
    /// # Returns
    ///
    /// The text to print for the user.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the command execution fails.
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        match self {
            Command::Add(cmd) => {
                let id = cmd.execute(db).await?;
                Ok(format!("Created task: {}", id))
            }
            Command::List(cmd) => {
                let tasks = cmd.execute(db).await?;
                Ok(output::format_task_table(&tasks))
            }
            Command::Show(cmd) => {
                let result = cmd.execute(db).await?;
                Ok(result.to_string())
            }
            Command::Edit(cmd) => {
                let id = cmd.execute(db).await?;
                Ok(format!("Updated task: {}", id))
            }
            Command::Done(cmd) => {
                let result = cmd.execute(db).await?;
                Ok(result.to_string())
            }
            Command::Delete(cmd) => {
                let result = cmd.execute(db).await?;
                Ok(result.to_string())
            }
            Command::Reorder(cmd) => {
                let moved = cmd.execute(db).await?;
                Ok(format!("Reordered: {} task(s) moved", moved))
            }
        }
    }
}
