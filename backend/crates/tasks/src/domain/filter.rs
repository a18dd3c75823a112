//! Task listing filter and sort options

use chrono::NaiveDate;

use crate::domain::value_object::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Title,
    /// Tasks without a due date sort last in either direction
    DueDate,
    /// Workflow order: pending, in_progress, completed
    Status,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: TaskSortField,
    pub order: SortOrder,
}

/// Filter for listing a user's tasks
///
/// With no `sort`, tasks come newest first (`created_at DESC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Matches tasks due on this calendar day (UTC)
    pub due_on: Option<NaiveDate>,
    /// Case-insensitive substring over title, description, status and the
    /// `YYYY-MM-DD` form of the due date
    pub search: Option<String>,
    pub sort: Option<TaskSort>,
}

impl TaskFilter {
    /// Search term, ignoring blank input
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
