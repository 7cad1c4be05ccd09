//! Manual-ordering maintenance
//!
//! Tasks carry a `display_order` index scoped per parent: the top-level
//! tasks and the sub-tasks of each parent form independent 0-based
//! sequences. New tasks append to their sequence; a reorder request
//! re-sequences one sibling set from a client-submitted id list.

use crate::error::DbResult;
use crate::models::Task;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{debug, warn};

/// Repository for display-order queries and updates
pub struct OrderRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Row for reading sibling orders
#[derive(Debug, Deserialize)]
struct OrderRow {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
    #[serde(default)]
    display_order: i64,
}

impl<'a> OrderRepository<'a> {
    /// Create a new OrderRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Next display-order value for the given parent scope.
    ///
    /// Returns 0 when the scope has no tasks yet, otherwise one past the
    /// current maximum. Call this before persisting the new task and
    /// store the value on the record at creation.
    ///
    /// # Arguments
    ///
    /// * `parent` - `None` for the top-level scope, else the parent's
    ///   record key
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database query fails.
    pub async fn next_display_order(&self, parent: Option<&str>) -> DbResult<i64> {
        let query = match parent {
            None => "SELECT id, display_order FROM task WHERE parent = NONE".to_string(),
            Some(key) => format!(
                "SELECT id, display_order FROM task WHERE parent = \"{}\"",
                key
            ),
        };

        let mut result = self.client.query(&query).await?;
        let rows: Vec<OrderRow> = result.take(0)?;

        let next = rows
            .iter()
            .map(|row| row.display_order)
            .max()
            .map_or(0, |max| max + 1);
        debug!("Next display order for scope {:?}: {}", parent, next);

        Ok(next)
    }

    /// Re-sequence a sibling set from a client-submitted ordered id list.
    ///
    /// Each id takes its 0-based position in the list as its new
    /// `display_order`. Ids that do not exist, or whose current parent
    /// does not match the given scope, are skipped with a warning --
    /// stale or malformed payloads never fail the whole batch. Tasks
    /// whose order already matches are left untouched; all changed rows
    /// are written in a single batched statement, and no write happens
    /// at all when nothing moved.
    ///
    /// # Arguments
    ///
    /// * `ordered_keys` - Record keys in their new display order
    /// * `parent` - `None` for the top-level scope, else the parent's
    ///   record key
    ///
    /// # Returns
    ///
    /// The number of tasks whose order was updated.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if a lookup or the batch write fails.
    pub async fn reorder(&self, ordered_keys: &[String], parent: Option<&str>) -> DbResult<usize> {
        let mut updates: Vec<(String, i64)> = Vec::new();

        for (position, key) in ordered_keys.iter().enumerate() {
            let task: Option<Task> = self.client.select(("task", key.as_str())).await?;

            let Some(task) = task else {
                warn!("Task '{}' not found during reorder, skipping", key);
                continue;
            };

            let scope_matches = match (parent, task.parent.as_deref()) {
                (None, None) => true,
                (Some(expected), Some(actual)) => expected == actual,
                _ => false,
            };
            if !scope_matches {
                warn!(
                    "Task '{}' (parent: {:?}) does not match expected parent scope {:?}, \
                     skipping order update",
                    key, task.parent, parent
                );
                continue;
            }

            let new_order = position as i64;
            if task.display_order != new_order {
                updates.push((key.clone(), new_order));
            }
        }

        if updates.is_empty() {
            debug!("Reorder produced no changes, skipping write");
            return Ok(0);
        }

        let batch = updates
            .iter()
            .map(|(key, order)| {
                format!(
                    "UPDATE task:{} SET display_order = {}, updated_at = time::now()",
                    key, order
                )
            })
            .collect::<Vec<_>>()
            .join(";\n");

        debug!("Applying {} display-order updates", updates.len());
        self.client.query(&batch).await?.check()?;

        Ok(updates.len())
    }
}
