//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{FileId, TaskId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{File, Task};
use crate::domain::filter::{TaskFilter, TaskSortField};
use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::value_object::{TaskDescription, TaskStatus, TaskTitle};
use crate::error::{TaskError, TaskResult};

const TASK_COLUMNS: &str =
    "id, title, description, status, due_date, user_id, created_at, updated_at";

/// PostgreSQL-backed task and file repository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE metacharacters so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append the optional `status`, due-day and text-search predicates
///
/// Expects the builder to already hold a `WHERE` clause.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }

    if let Some(day) = filter.due_on {
        qb.push(" AND (due_date AT TIME ZONE 'UTC')::date = ")
            .push_bind(day);
    }

    if let Some(term) = filter.search_term() {
        let pattern = like_pattern(term);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR COALESCE(description, '') ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR status ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR COALESCE(to_char(due_date AT TIME ZONE 'UTC', 'YYYY-MM-DD'), '') ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    let Some(sort) = filter.sort else {
        qb.push(" ORDER BY created_at DESC");
        return;
    };

    let order = sort.order.as_sql();
    match sort.field {
        // Titles compare case-insensitively
        TaskSortField::Title => {
            qb.push(format!(" ORDER BY LOWER(title) {order}"));
        }
        TaskSortField::DueDate => {
            qb.push(format!(" ORDER BY due_date {order} NULLS LAST"));
        }
        TaskSortField::Status => {
            qb.push(" ORDER BY CASE status");
            for status in TaskStatus::ALL {
                qb.push(format!(" WHEN '{}' THEN {}", status.as_str(), status.rank()));
            }
            qb.push(format!(" END {order}"));
        }
        TaskSortField::CreatedAt => {
            qb.push(format!(" ORDER BY created_at {order}"));
        }
    }
    qb.push(", created_at DESC");
}

impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &Task) -> TaskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id,
                title,
                description,
                status,
                due_date,
                user_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.user_id.as_uuid())
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                due_date = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(format!(
                "Task with id {} not found",
                task.task_id
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, task_id: &TaskId) -> TaskResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_task()).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> TaskResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_task()).collect()
    }

    async fn search(&self, user_id: &UserId, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = "
        ));
        qb.push_bind(user_id.into_uuid());

        push_filters(&mut qb, filter);
        push_order_by(&mut qb, filter);

        let rows = qb
            .build_query_as::<TaskRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_task()).collect()
    }

    async fn delete(&self, task_id: &TaskId) -> TaskResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl FileRepository for PgTaskRepository {
    async fn create(&self, file: &File) -> TaskResult<()> {
        let size = i64::try_from(file.size)
            .map_err(|_| TaskError::Internal(format!("File size {} out of range", file.size)))?;

        sqlx::query(
            r#"
            INSERT INTO files (
                id,
                task_id,
                filename,
                mimetype,
                size,
                path,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(file.file_id.as_uuid())
        .bind(file.task_id.as_uuid())
        .bind(&file.filename)
        .bind(&file.mimetype)
        .bind(size)
        .bind(&file.path)
        .bind(file.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, file_id: &FileId) -> TaskResult<Option<File>> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, task_id, filename, mimetype, size, path, created_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(file_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_file()).transpose()
    }

    async fn find_by_task_id(&self, task_id: &TaskId) -> TaskResult<Vec<File>> {
        let rows = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, task_id, filename, mimetype, size, path, created_at
            FROM files
            WHERE task_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_file()).collect()
    }

    async fn delete(&self, file_id: &FileId) -> TaskResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    due_date: Option<DateTime<Utc>>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> TaskResult<Task> {
        let status: TaskStatus = self.status.parse().map_err(|_| {
            TaskError::Internal(format!("Unknown task status in database: {}", self.status))
        })?;

        Ok(Task {
            task_id: TaskId::from_uuid(self.id),
            title: TaskTitle::from_db(self.title),
            description: self.description.map(TaskDescription::from_db),
            status,
            due_date: self.due_date,
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    task_id: Uuid,
    filename: String,
    mimetype: String,
    size: i64,
    path: String,
    created_at: DateTime<Utc>,
}

impl FileRow {
    fn into_file(self) -> TaskResult<File> {
        let size = u64::try_from(self.size).map_err(|_| {
            TaskError::Internal(format!("Negative file size in database: {}", self.size))
        })?;

        Ok(File {
            file_id: FileId::from_uuid(self.id),
            task_id: TaskId::from_uuid(self.task_id),
            filename: self.filename,
            mimetype: self.mimetype,
            size,
            path: self.path,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{SortOrder, TaskSort};
    use chrono::NaiveDate;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("report"), "%report%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    fn order_sql(filter: &TaskFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM tasks");
        push_order_by(&mut qb, filter);
        qb.sql().to_string()
    }

    fn filter_sql(filter: &TaskFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM tasks WHERE user_id = ");
        qb.push_bind(Uuid::nil());
        push_filters(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_no_filters_only_scope_by_owner() {
        assert_eq!(
            filter_sql(&TaskFilter::default()),
            "SELECT 1 FROM tasks WHERE user_id = $1"
        );
    }

    #[test]
    fn test_status_and_due_day_filters() {
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            due_on: NaiveDate::from_ymd_opt(2025, 3, 14),
            ..Default::default()
        };
        assert_eq!(
            filter_sql(&filter),
            "SELECT 1 FROM tasks WHERE user_id = $1 AND status = $2 \
             AND (due_date AT TIME ZONE 'UTC')::date = $3"
        );
    }

    #[test]
    fn test_search_covers_every_text_column() {
        let filter = TaskFilter {
            search: Some("  2025-03 ".into()),
            ..Default::default()
        };
        assert_eq!(
            filter_sql(&filter),
            "SELECT 1 FROM tasks WHERE user_id = $1 AND (title ILIKE $2 \
             OR COALESCE(description, '') ILIKE $3 \
             OR status ILIKE $4 \
             OR COALESCE(to_char(due_date AT TIME ZONE 'UTC', 'YYYY-MM-DD'), '') ILIKE $5)"
        );
    }

    #[test]
    fn test_blank_search_adds_no_clause() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            filter_sql(&filter),
            "SELECT 1 FROM tasks WHERE user_id = $1 AND status = $2"
        );
    }

    #[test]
    fn test_title_order_ignores_case() {
        let filter = TaskFilter {
            sort: Some(TaskSort {
                field: TaskSortField::Title,
                order: SortOrder::Asc,
            }),
            ..Default::default()
        };
        assert_eq!(
            order_sql(&filter),
            "SELECT 1 FROM tasks ORDER BY LOWER(title) ASC, created_at DESC"
        );
    }

    #[test]
    fn test_status_order_follows_workflow() {
        let filter = TaskFilter {
            sort: Some(TaskSort {
                field: TaskSortField::Status,
                order: SortOrder::Asc,
            }),
            ..Default::default()
        };
        assert_eq!(
            order_sql(&filter),
            "SELECT 1 FROM tasks ORDER BY CASE status \
             WHEN 'pending' THEN 1 WHEN 'in_progress' THEN 2 WHEN 'completed' THEN 3 \
             END ASC, created_at DESC"
        );
    }

    #[test]
    fn test_default_order_is_newest_first() {
        assert_eq!(
            order_sql(&TaskFilter::default()),
            "SELECT 1 FROM tasks ORDER BY created_at DESC"
        );
    }

    #[test]
    fn test_due_date_order_puts_missing_last() {
        let filter = TaskFilter {
            sort: Some(TaskSort {
                field: TaskSortField::DueDate,
                order: SortOrder::Desc,
            }),
            ..Default::default()
        };
        assert_eq!(
            order_sql(&filter),
            "SELECT 1 FROM tasks ORDER BY due_date DESC NULLS LAST, created_at DESC"
        );
    }
}
