//! Test infrastructure for integration tests
//!
//! Provides isolated database setup/teardown and command builder
//! helpers. Each test gets its own database instance to ensure no
//! shared state.

use std::path::PathBuf;
use taskpad::commands::{AddCommand, ListCommand};
use taskpad_db::Database;

/// Test context containing an isolated database and temp directory
pub struct TestContext {
    pub db: Database,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an isolated database.
    ///
    /// Each call creates a uniquely named temp directory using process
    /// ID, thread ID, and nanosecond timestamp to guarantee isolation.
    pub async fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "tpd-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command builder helpers
// =============================================================================

/// Create an AddCommand with default optional fields filled in.
pub fn add_cmd(title: &str) -> AddCommand {
    AddCommand {
        title: title.to_string(),
        due: None,
        priority: None,
        parent: None,
    }
}

/// Create an AddCommand with a parent id.
pub fn add_cmd_with_parent(title: &str, parent: &str) -> AddCommand {
    AddCommand {
        title: title.to_string(),
        due: None,
        priority: None,
        parent: Some(parent.to_string()),
    }
}

/// Create a ListCommand with no filters (all tasks, manual order).
pub fn list_cmd() -> ListCommand {
    ListCommand {
        status: "all".to_string(),
        due: "all".to_string(),
        priority: None,
        search: None,
        sort: None,
        dir: None,
    }
}
