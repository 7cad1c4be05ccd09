//! Show command for displaying a single task
//!
//! Implements the `tpd show` command: task details plus its sub-tasks
//! in manual order.

use clap::Args;
use taskpad_db::{Database, DbError, Task};

/// Show a task and its sub-tasks
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Task id to show
    #[arg(required = true)]
    pub id: String,
}

/// Result of the show command execution
#[derive(Debug)]
pub struct ShowResult {
    /// The record key of the task
    pub id: String,
    /// The task itself
    pub task: Task,
    /// Sub-tasks in manual order
    pub children: Vec<Task>,
}

impl std::fmt::Display for ShowResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}  {}", self.id, self.task.title)?;
        writeln!(
            f,
            "  status:    {}",
            if self.task.completed { "done" } else { "pending" }
        )?;
        writeln!(f, "  priority:  {}", self.task.priority)?;
        match self.task.due_date {
            Some(due) => writeln!(f, "  due:       {}", due.format("%Y-%m-%d"))?,
            None => writeln!(f, "  due:       -")?,
        }
        if let Some(created) = self.task.created_at {
            writeln!(f, "  created:   {}", created.format("%Y-%m-%d %H:%M"))?;
        }
        write!(f, "  order:     {}", self.task.display_order)?;

        if !self.children.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "  sub-tasks:")?;
            for child in &self.children {
                let marker = if child.completed { "x" } else { " " };
                let key = child.record_key().unwrap_or_else(|| "-".to_string());
                write!(f, "\n    [{}] {}  {}", marker, key, child.title)?;
            }
        }

        Ok(())
    }
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the task does not exist.
    pub async fn execute(&self, db: &Database) -> Result<ShowResult, DbError> {
        let task = db
            .tasks()
            .get(&self.id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                task_id: self.id.clone(),
            })?;

        let children = db.lister().children(&self.id).await?;

        Ok(ShowResult {
            id: self.id.clone(),
            task,
            children,
        })
    }
}
