//! Repository layer for task storage
//!
//! Each repository wraps the SurrealDB client for one concern: CRUD,
//! listing with filter/sort, and manual-order maintenance.

pub mod filter;
pub mod order;
pub mod sort;
pub mod task;

pub use filter::{DueFilter, StatusFilter, TaskFilter, TaskLister};
pub use order::OrderRepository;
pub use sort::{SortDir, SortField, TaskSort};
pub use task::{TaskRepository, TaskUpdate};
