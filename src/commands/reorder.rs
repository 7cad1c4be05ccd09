//! Reorder command for manual task ordering
//!
//! Implements the `tpd reorder` command: the given ids take their
//! position in the argument list as their new display order, within one
//! parent scope.

use clap::Args;
use taskpad_db::{Database, DbError};

/// Re-sequence tasks into the given manual order
#[derive(Debug, Args)]
pub struct ReorderCommand {
    /// Task ids in their new display order (at least one)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Parent task id scoping the reorder (top-level when omitted)
    #[arg(long)]
    pub parent: Option<String>,
}

impl ReorderCommand {
    /// Execute the reorder command.
    ///
    /// Ids that don't exist or that belong to a different parent scope
    /// are skipped with a logged warning; the rest are re-sequenced in
    /// one batch.
    ///
    /// # Returns
    ///
    /// The number of tasks whose order changed.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database operation fails.
    pub async fn execute(&self, db: &Database) -> Result<usize, DbError> {
        db.orders()
            .reorder(&self.ids, self.parent.as_deref())
            .await
    }
}
