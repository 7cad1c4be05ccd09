//! Task filtering and listing queries
//!
//! Provides the filter tokens accepted by the list operation, a
//! composable `TaskFilter` predicate, and the `TaskLister` that applies
//! filter and sort to the top-level task set.

use crate::error::DbResult;
use crate::models::{Priority, Task};
use crate::repository::sort::TaskSort;
use chrono::{Duration, Local, NaiveDate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Completion-status filter token
///
/// Parsed leniently: anything that is not `completed` or `pending`
/// (including `all`, blanks, and unrecognized tokens) applies no
/// restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    /// Parse a status token (case-insensitive)
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "completed" => StatusFilter::Completed,
            "pending" => StatusFilter::Pending,
            _ => StatusFilter::All,
        }
    }

    /// Whether the given task passes this status clause
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }
}

/// Due-date filter token
///
/// An explicit ISO date is tried first; otherwise the known keywords
/// apply, and anything else (including `all` and blanks) applies no
/// restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueFilter {
    #[default]
    Any,
    /// Due exactly on the given date
    On(NaiveDate),
    /// Due before today and not completed
    Overdue,
    /// Due exactly today, regardless of completion
    Today,
    /// Due within the seven-day window starting today, regardless of
    /// completion
    NextSevenDays,
}

impl DueFilter {
    /// Parse a due-date token.
    ///
    /// Tries `YYYY-MM-DD` first, then the keywords `overdue`, `today`,
    /// and `next_7_days` (case-insensitive). Unrecognized tokens degrade
    /// to no restriction rather than erroring.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return DueFilter::Any;
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return DueFilter::On(date);
        }
        match trimmed.to_lowercase().as_str() {
            "overdue" => DueFilter::Overdue,
            "today" => DueFilter::Today,
            "next_7_days" => DueFilter::NextSevenDays,
            _ => DueFilter::Any,
        }
    }

    /// Whether the given task passes this due-date clause
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            DueFilter::Any => true,
            DueFilter::On(date) => task.due_date == Some(*date),
            DueFilter::Overdue => task.is_overdue(today),
            DueFilter::Today => task.is_due_today(today),
            DueFilter::NextSevenDays => match task.due_date {
                Some(due) => due >= today && due <= today + Duration::days(6),
                None => false,
            },
        }
    }
}

/// Filter criteria for listing tasks
///
/// All clauses AND together; each clause defaults to "no restriction",
/// so an empty filter matches every task. The filter is a plain
/// predicate over a task and a reference date, with no side effects.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Completion-status clause
    pub status: StatusFilter,
    /// Priority equality clause (`None` means no restriction)
    pub priority: Option<Priority>,
    /// Due-date clause
    pub due: DueFilter,
    /// Case-insensitive title substring clause
    pub search: Option<String>,
}

impl TaskFilter {
    /// Create a new empty filter matching all tasks
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by completion status
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Restrict to tasks with the given priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restrict by due-date bucket or explicit date
    pub fn with_due(mut self, due: DueFilter) -> Self {
        self.due = due;
        self
    }

    /// Restrict to titles containing the given term (case-insensitive)
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Whether the given task passes every clause of this filter.
    ///
    /// `today` is supplied by the caller so the evaluation stays pure;
    /// the lister takes it fresh on every call.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.status.matches(task) {
            return false;
        }

        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }

        if !self.due.matches(task, today) {
            return false;
        }

        if let Some(term) = &self.search {
            let term = term.trim();
            if !term.is_empty()
                && !task.title.to_lowercase().contains(&term.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

/// Repository for listing tasks with filters and sorting
///
/// Listing is always restricted to top-level tasks; sub-tasks are only
/// reachable through `children`.
pub struct TaskLister<'a> {
    client: &'a Surreal<Db>,
}

impl<'a> TaskLister<'a> {
    /// Create a new TaskLister with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// List top-level tasks matching the filter, in the given order.
    ///
    /// Fetches the top-level set from the database, applies the filter
    /// predicate with today's date, and sorts with the resolver. The
    /// whole matching set is returned; there is no pagination.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database query fails.
    pub async fn list(&self, filter: &TaskFilter, sort: &TaskSort) -> DbResult<Vec<Task>> {
        debug!("Listing top-level tasks with filter: {:?}", filter);
        let mut result = self
            .client
            .query("SELECT * FROM task WHERE parent = NONE")
            .await?;
        let tasks: Vec<Task> = result.take(0)?;

        let today = Local::now().date_naive();
        let mut tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| filter.matches(task, today))
            .collect();
        tasks.sort_by(|a, b| sort.compare(a, b));

        Ok(tasks)
    }

    /// List the sub-tasks of one parent in manual order.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the database query fails.
    pub async fn children(&self, parent: &str) -> DbResult<Vec<Task>> {
        let query = format!(
            "SELECT * FROM task WHERE parent = \"{}\" ORDER BY display_order ASC",
            parent
        );
        let mut result = self.client.query(&query).await?;
        let tasks: Vec<Task> = result.take(0)?;
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========================================
    // Token parsing tests
    // ========================================

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse("completed"), StatusFilter::Completed);
        assert_eq!(StatusFilter::parse("PENDING"), StatusFilter::Pending);
        assert_eq!(StatusFilter::parse("all"), StatusFilter::All);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(StatusFilter::parse("bogus"), StatusFilter::All);
    }

    #[test]
    fn test_due_filter_parse_explicit_date_first() {
        assert_eq!(
            DueFilter::parse("2025-01-15"),
            DueFilter::On(date(2025, 1, 15))
        );
    }

    #[test]
    fn test_due_filter_parse_keywords() {
        assert_eq!(DueFilter::parse("overdue"), DueFilter::Overdue);
        assert_eq!(DueFilter::parse("TODAY"), DueFilter::Today);
        assert_eq!(DueFilter::parse("Next_7_Days"), DueFilter::NextSevenDays);
    }

    #[test]
    fn test_due_filter_parse_unrecognized_degrades() {
        assert_eq!(DueFilter::parse("all"), DueFilter::Any);
        assert_eq!(DueFilter::parse(""), DueFilter::Any);
        assert_eq!(DueFilter::parse("someday"), DueFilter::Any);
        assert_eq!(DueFilter::parse("2025-13-45"), DueFilter::Any);
    }

    // ========================================
    // Predicate tests
    // ========================================

    #[test]
    fn test_empty_filter_matches_everything() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new();
        assert!(filter.matches(&Task::new("Anything"), today));
        assert!(filter.matches(&Task::new("Done").with_completed(true), today));
    }

    #[test]
    fn test_status_clause() {
        let today = date(2025, 5, 10);
        let done = Task::new("Done").with_completed(true);
        let open = Task::new("Open");

        let completed = TaskFilter::new().with_status(StatusFilter::Completed);
        assert!(completed.matches(&done, today));
        assert!(!completed.matches(&open, today));

        let pending = TaskFilter::new().with_status(StatusFilter::Pending);
        assert!(pending.matches(&open, today));
        assert!(!pending.matches(&done, today));
    }

    #[test]
    fn test_priority_clause() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_priority(Priority::High);
        assert!(filter.matches(&Task::new("Hot").with_priority(Priority::High), today));
        assert!(!filter.matches(&Task::new("Calm"), today));
    }

    #[test]
    fn test_due_on_clause() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::On(date(2025, 5, 12)));
        assert!(filter.matches(&Task::new("Exact").with_due_date(date(2025, 5, 12)), today));
        assert!(!filter.matches(&Task::new("Other").with_due_date(date(2025, 5, 13)), today));
        assert!(!filter.matches(&Task::new("Undated"), today));
    }

    #[test]
    fn test_due_on_clause_matches_completed() {
        // Explicit-date equality is not completion-filtered
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::On(date(2025, 5, 12)));
        let done = Task::new("Done exact")
            .with_due_date(date(2025, 5, 12))
            .with_completed(true);
        assert!(filter.matches(&done, today));
    }

    #[test]
    fn test_overdue_clause() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::Overdue);

        assert!(filter.matches(&Task::new("Late").with_due_date(date(2025, 5, 9)), today));
        assert!(!filter.matches(&Task::new("Today").with_due_date(today), today));
        assert!(!filter.matches(&Task::new("Undated"), today));

        let done_late = Task::new("Done late")
            .with_due_date(date(2025, 5, 9))
            .with_completed(true);
        assert!(!filter.matches(&done_late, today));
    }

    #[test]
    fn test_today_clause_ignores_completion() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::Today);

        assert!(filter.matches(&Task::new("Today").with_due_date(today), today));

        let done_today = Task::new("Done today")
            .with_due_date(today)
            .with_completed(true);
        assert!(filter.matches(&done_today, today));
    }

    #[test]
    fn test_next_seven_days_window() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::NextSevenDays);

        // Seven-day window starting today: [today, today + 6]
        assert!(filter.matches(&Task::new("Start").with_due_date(today), today));
        assert!(filter.matches(&Task::new("End").with_due_date(date(2025, 5, 16)), today));
        assert!(!filter.matches(&Task::new("Past").with_due_date(date(2025, 5, 9)), today));
        assert!(!filter.matches(&Task::new("Beyond").with_due_date(date(2025, 5, 17)), today));
        assert!(!filter.matches(&Task::new("Undated"), today));
    }

    #[test]
    fn test_next_seven_days_ignores_completion() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_due(DueFilter::NextSevenDays);
        let done_soon = Task::new("Done soon")
            .with_due_date(date(2025, 5, 12))
            .with_completed(true);
        assert!(filter.matches(&done_soon, today));
    }

    #[test]
    fn test_search_clause_case_insensitive() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_search("REPORT");
        assert!(filter.matches(&Task::new("Write the report draft"), today));
        assert!(!filter.matches(&Task::new("Buy groceries"), today));
    }

    #[test]
    fn test_search_clause_blank_matches_all() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new().with_search("   ");
        assert!(filter.matches(&Task::new("Anything"), today));
    }

    #[test]
    fn test_clauses_compose_with_and() {
        let today = date(2025, 5, 10);
        let filter = TaskFilter::new()
            .with_status(StatusFilter::Pending)
            .with_priority(Priority::High)
            .with_due(DueFilter::Today)
            .with_search("ship");

        let hit = Task::new("Ship the release")
            .with_priority(Priority::High)
            .with_due_date(today);
        assert!(filter.matches(&hit, today));

        let wrong_priority = Task::new("Ship the release").with_due_date(today);
        assert!(!filter.matches(&wrong_priority, today));

        let wrong_title = Task::new("Plan the release")
            .with_priority(Priority::High)
            .with_due_date(today);
        assert!(!filter.matches(&wrong_title, today));
    }

    // ========================================
    // TaskLister integration tests
    // ========================================

    #[tokio::test]
    async fn test_list_returns_only_top_level() {
        let db = test_utils::create_test_db().await.unwrap();

        test_utils::create_task_in_db(&db, "parent1", "Parent", None, 0)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "child1", "Child", Some("parent1"), 0)
            .await
            .unwrap();

        let lister = TaskLister::new(&db);
        let tasks = lister
            .list(&TaskFilter::new(), &TaskSort::default())
            .await
            .unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Parent");
        assert!(tasks.iter().all(|t| t.parent.is_none()));
    }

    #[tokio::test]
    async fn test_list_sorts_by_display_order_by_default() {
        let db = test_utils::create_test_db().await.unwrap();

        test_utils::create_task_in_db(&db, "a", "First added", None, 2)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "b", "Second added", None, 0)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "c", "Third added", None, 1)
            .await
            .unwrap();

        let lister = TaskLister::new(&db);
        let tasks = lister
            .list(&TaskFilter::new(), &TaskSort::default())
            .await
            .unwrap();

        let orders: Vec<i64> = tasks.iter().map(|t| t.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_list_empty_database() {
        let db = test_utils::create_test_db().await.unwrap();

        let lister = TaskLister::new(&db);
        let tasks = lister
            .list(&TaskFilter::new(), &TaskSort::default())
            .await
            .unwrap();

        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_children_ordered_by_display_order() {
        let db = test_utils::create_test_db().await.unwrap();

        test_utils::create_task_in_db(&db, "parent1", "Parent", None, 0)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "c1", "Child one", Some("parent1"), 1)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "c2", "Child two", Some("parent1"), 0)
            .await
            .unwrap();
        test_utils::create_task_in_db(&db, "other", "Other top", None, 1)
            .await
            .unwrap();

        let lister = TaskLister::new(&db);
        let children = lister.children("parent1").await.unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].title, "Child two");
        assert_eq!(children[1].title, "Child one");
    }

    #[tokio::test]
    async fn test_children_of_unknown_parent_is_empty() {
        let db = test_utils::create_test_db().await.unwrap();

        let lister = TaskLister::new(&db);
        let children = lister.children("nonexistent").await.unwrap();
        assert!(children.is_empty());
    }
}
