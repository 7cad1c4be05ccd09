//! Database module for Taskpad
//!
//! Provides SurrealDB connection management with an embedded SurrealKV
//! backend, schema initialization, and the task query/ordering core.

pub mod error;
pub mod models;
pub mod repository;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::{Priority, Task};
pub use repository::{
    DueFilter, OrderRepository, SortDir, SortField, StatusFilter, TaskFilter, TaskLister,
    TaskRepository, TaskSort, TaskUpdate,
};

use std::path::{Path, PathBuf};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, SurrealKv};

/// Default database directory under the user's home directory
pub const DEFAULT_DB_DIR: &str = ".tpd/data";

/// Database wrapper providing connection management for SurrealDB
pub struct Database {
    /// The underlying SurrealDB client
    client: Surreal<Db>,
    /// Path where the database is stored
    path: PathBuf,
}

impl Database {
    /// Connect to a SurrealDB database at the specified path.
    ///
    /// Creates the database directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database directory
    ///
    /// # Errors
    ///
    /// Returns `DbError::CreateDirectory` if directory creation fails.
    /// Returns `DbError::Connection` if database connection fails.
    pub async fn connect(path: &Path) -> DbResult<Self> {
        let path = Self::prepare_path(path)?;

        let client =
            Surreal::new::<SurrealKv>(path.clone())
                .await
                .map_err(|e| DbError::Connection {
                    path: path.clone(),
                    source: Box::new(e),
                })?;

        Ok(Self { client, path })
    }

    /// Initialize the database schema.
    ///
    /// Selects the namespace and database for Taskpad operations, then
    /// initializes the task table.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if schema initialization fails.
    pub async fn init(&self) -> DbResult<()> {
        self.client
            .use_ns("taskpad")
            .use_db("main")
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        schema::init_schema(&self.client).await?;

        Ok(())
    }

    /// Get the path where the database is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Task CRUD repository.
    pub fn tasks(&self) -> TaskRepository<'_> {
        TaskRepository::new(&self.client)
    }

    /// Listing queries (filter + sort over top-level tasks).
    pub fn lister(&self) -> TaskLister<'_> {
        TaskLister::new(&self.client)
    }

    /// Manual-ordering maintenance (next order value, reorder).
    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.client)
    }

    /// Get the default database path under the user's home directory.
    ///
    /// Falls back to the current working directory when no home directory
    /// can be determined.
    pub fn default_path() -> PathBuf {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(DEFAULT_DB_DIR)
    }

    /// Prepare the database path by validating and creating directories.
    fn prepare_path(path: &Path) -> DbResult<PathBuf> {
        let path = path.to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| DbError::CreateDirectory {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(path)
    }
}

// Ensure Database is Send + Sync for async compatibility
static_assertions::assert_impl_all!(Database: Send, Sync);

/// Test utilities for creating isolated test databases
#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::models::Task;
    use std::env;

    /// Create an isolated SurrealDB database for testing
    ///
    /// Each call creates its own SurrealKV database in a unique temp
    /// directory, so tests can run concurrently without interference.
    pub async fn create_test_db() -> DbResult<Surreal<Db>> {
        let temp_dir = env::temp_dir().join(format!(
            "tpd-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let client = Surreal::new::<SurrealKv>(temp_dir.clone())
            .await
            .map_err(|e| DbError::Connection {
                path: temp_dir.clone(),
                source: Box::new(e),
            })?;

        client
            .use_ns("taskpad")
            .use_db("main")
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        schema::init_schema(&client).await?;

        Ok(client)
    }

    /// Insert a task with the given properties into a test database.
    ///
    /// Use this to set up test data quickly without going through the
    /// repository layer under test.
    pub async fn create_task_in_db(
        db: &Surreal<Db>,
        id: &str,
        title: &str,
        parent: Option<&str>,
        display_order: i64,
    ) -> DbResult<()> {
        let parent_str = match parent {
            Some(p) => format!("\"{}\"", p),
            None => "NONE".to_string(),
        };
        let query = format!(
            r#"CREATE task:{} SET
                title = "{}",
                completed = false,
                due_date = NONE,
                priority = "medium",
                parent = {},
                display_order = {}"#,
            id, title, parent_str, display_order
        );
        db.query(&query).await?.check()?;
        Ok(())
    }

    /// Fetch a task from a test database by record key.
    pub async fn fetch_task_from_db(db: &Surreal<Db>, id: &str) -> DbResult<Option<Task>> {
        let query = format!("SELECT * FROM task:{}", id);
        let mut result = db.query(&query).await?;
        let task: Option<Task> = result.take(0)?;
        Ok(task)
    }
}
