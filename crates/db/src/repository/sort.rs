//! Sort resolution for task listings
//!
//! Maps raw sort tokens to a total ordering over tasks. Manual order
//! (`display_order`) is the default sort and the universal tiebreak, so
//! repeated queries always return tasks in the same sequence even when
//! the primary field has duplicates or missing values.

use crate::models::Task;
use std::cmp::Ordering;

/// Field a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    DueDate,
    Priority,
    CreationDate,
    #[default]
    DisplayOrder,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// A resolved total ordering over tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSort {
    /// Primary sort field
    pub field: SortField,
    /// Direction applied to the primary field only
    pub dir: SortDir,
}

impl TaskSort {
    /// Resolve raw sort tokens into an ordering.
    ///
    /// The direction token is validated independently of the field:
    /// `desc` (case-insensitive) means descending, anything else means
    /// ascending. Blank, `manual`, `display_order`, and unrecognized
    /// field tokens all resolve to manual order.
    pub fn resolve(sort_by: Option<&str>, sort_dir: Option<&str>) -> Self {
        let dir = match sort_dir {
            Some(token) if token.trim().eq_ignore_ascii_case("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        };

        let field = match sort_by.map(|token| token.trim().to_lowercase()) {
            Some(token) => match token.as_str() {
                "title" => SortField::Title,
                "due_date" | "duedate" => SortField::DueDate,
                "priority" => SortField::Priority,
                "created" | "creation_date" | "creationdate" => SortField::CreationDate,
                _ => SortField::DisplayOrder,
            },
            None => SortField::DisplayOrder,
        };

        Self { field, dir }
    }

    /// Compare two tasks under this ordering.
    ///
    /// The direction reverses the primary comparison only; when the
    /// primary field is not the manual order, ties break by ascending
    /// `display_order` regardless of direction.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let primary = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::DueDate => cmp_optional(&a.due_date, &b.due_date),
            SortField::Priority => a.priority.cmp(&b.priority),
            SortField::CreationDate => cmp_optional(&a.created_at, &b.created_at),
            SortField::DisplayOrder => a.display_order.cmp(&b.display_order),
        };

        let primary = match self.dir {
            SortDir::Asc => primary,
            SortDir::Desc => primary.reverse(),
        };

        match self.field {
            SortField::DisplayOrder => primary,
            _ => primary.then_with(|| a.display_order.cmp(&b.display_order)),
        }
    }
}

/// Compare optional values with missing values ordered after present
/// ones (ascending).
fn cmp_optional<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
