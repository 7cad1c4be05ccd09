//! Database schema initialization for Taskpad
//!
//! Defines the SurrealDB schema for the task table.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the task table with all fields
    pub const DEFINE_TASK_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS task SCHEMAFULL;

        DEFINE FIELD title ON task TYPE string;

        DEFINE FIELD completed ON task TYPE bool DEFAULT false;

        DEFINE FIELD due_date ON task TYPE option<string>;

        DEFINE FIELD priority ON task TYPE string
            ASSERT $value IN ["low", "medium", "high"];

        DEFINE FIELD parent ON task TYPE option<string>;

        DEFINE FIELD display_order ON task TYPE int DEFAULT 0;

        DEFINE FIELD created_at ON task TYPE datetime DEFAULT time::now();

        DEFINE FIELD updated_at ON task TYPE datetime DEFAULT time::now();
    "#;
}

/// Initialize the database schema.
///
/// Creates the task table with all required fields and constraints.
///
/// This function is idempotent - it can be called multiple times safely
/// as it uses `IF NOT EXISTS` clauses.
///
/// # Arguments
///
/// * `client` - Reference to the SurrealDB client
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    client
        .query(sql::DEFINE_TASK_TABLE)
        .await
        .map_err(|e| DbError::Schema(Box::new(e)))?;

    Ok(())
}
