//! List command for displaying tasks
//!
//! Implements the `tpd list` command: top-level tasks filtered by
//! status, priority, due bucket, and title search, sorted by the
//! requested field with manual order as the stable fallback.

use clap::Args;
use taskpad_db::{Database, DbError, DueFilter, Priority, StatusFilter, Task, TaskFilter, TaskSort};

/// List top-level tasks with optional filters
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by completion status (all, completed, pending)
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Filter by due date (overdue, today, next_7_days, a YYYY-MM-DD
    /// date, or all)
    #[arg(long, default_value = "all")]
    pub due: String,

    /// Filter by priority (low, medium, high)
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// Search text in titles (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort field (title, due_date, priority, created, manual)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long)]
    pub dir: Option<String>,
}

/// Parse a priority string into a Priority enum
fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority '{}'. Valid values: low, medium, high", s))
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Builds the filter and sort from the raw flag tokens and delegates
    /// to the lister. Unrecognized status/due/sort/dir tokens degrade to
    /// their defaults instead of erroring; only `--priority` is strict.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database query fails.
    pub async fn execute(&self, db: &Database) -> Result<Vec<Task>, DbError> {
        let filter = self.build_filter();
        let sort = TaskSort::resolve(self.sort.as_deref(), self.dir.as_deref());

        db.lister().list(&filter, &sort).await
    }

    /// Build the TaskFilter from command options
    fn build_filter(&self) -> TaskFilter {
        let mut filter = TaskFilter::new()
            .with_status(StatusFilter::parse(&self.status))
            .with_due(DueFilter::parse(&self.due));

        if let Some(priority) = self.priority {
            filter = filter.with_priority(priority);
        }

        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }

        filter
    }
}
