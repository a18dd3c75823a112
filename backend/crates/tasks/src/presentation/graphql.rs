//! GraphQL resolvers for tasks and attachments
//!
//! Every resolver requires an authenticated caller. Resolvers read
//! [`PgTaskState`] and [`PgAuthState`] from the schema data.

use async_graphql::{
    Context, Enum, ID, InputObject, MaybeUndefined, Object, Result as GqlResult, SimpleObject,
};
use auth::presentation::require_principal;
use auth::{PgAuthState, User, UserObject, UserRepository};
use chrono::{DateTime, Utc};
use kernel::error::conversions::GraphqlResultExt;

use crate::application::{CreateTaskInput, UpdateTaskInput};
use crate::domain::entity::{File, Task};
use crate::domain::filter::{SortOrder, TaskFilter, TaskSort, TaskSortField};
use crate::domain::value_object::TaskStatus;
use crate::error::{TaskError, TaskResult};
use crate::presentation::state::PgTaskState;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "TaskStatus")]
pub enum TaskStatusValue {
    #[graphql(name = "pending")]
    Pending,
    #[graphql(name = "in_progress")]
    InProgress,
    #[graphql(name = "completed")]
    Completed,
}

impl From<TaskStatus> for TaskStatusValue {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => TaskStatusValue::Pending,
            TaskStatus::InProgress => TaskStatusValue::InProgress,
            TaskStatus::Completed => TaskStatusValue::Completed,
        }
    }
}

impl From<TaskStatusValue> for TaskStatus {
    fn from(value: TaskStatusValue) -> Self {
        match value {
            TaskStatusValue::Pending => TaskStatus::Pending,
            TaskStatusValue::InProgress => TaskStatus::InProgress,
            TaskStatusValue::Completed => TaskStatus::Completed,
        }
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "TaskSortField")]
pub enum TaskSortFieldValue {
    Title,
    DueDate,
    Status,
    CreatedAt,
}

impl From<TaskSortFieldValue> for TaskSortField {
    fn from(value: TaskSortFieldValue) -> Self {
        match value {
            TaskSortFieldValue::Title => TaskSortField::Title,
            TaskSortFieldValue::DueDate => TaskSortField::DueDate,
            TaskSortFieldValue::Status => TaskSortField::Status,
            TaskSortFieldValue::CreatedAt => TaskSortField::CreatedAt,
        }
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "SortOrder")]
pub enum SortOrderValue {
    Asc,
    Desc,
}

impl From<SortOrderValue> for SortOrder {
    fn from(value: SortOrderValue) -> Self {
        match value {
            SortOrderValue::Asc => SortOrder::Asc,
            SortOrderValue::Desc => SortOrder::Desc,
        }
    }
}

#[derive(InputObject, Debug, Default)]
#[graphql(name = "TaskFilterInput")]
pub struct TaskFilterArgs {
    pub filter_by_status: Option<TaskStatusValue>,
    /// Only the calendar day (UTC) is compared
    pub filter_by_due_date: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub sort_by: Option<TaskSortFieldValue>,
    /// Defaults to `ASC`; ignored without `sortBy`
    pub sort_order: Option<SortOrderValue>,
}

impl From<TaskFilterArgs> for TaskFilter {
    fn from(args: TaskFilterArgs) -> Self {
        Self {
            status: args.filter_by_status.map(Into::into),
            due_on: args.filter_by_due_date.map(|d| d.date_naive()),
            search: args.search,
            sort: args.sort_by.map(|field| TaskSort {
                field: field.into(),
                order: args.sort_order.map(Into::into).unwrap_or_default(),
            }),
        }
    }
}

#[derive(InputObject, Debug)]
#[graphql(name = "CreateTaskInput")]
pub struct CreateTaskArgs {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatusValue,
    pub due_date: Option<String>,
}

impl From<CreateTaskArgs> for CreateTaskInput {
    fn from(args: CreateTaskArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            status: args.status.into(),
            due_date: args.due_date,
        }
    }
}

/// Omitted fields are left unchanged; `null` clears `description` and `dueDate`
#[derive(InputObject, Debug)]
#[graphql(name = "UpdateTaskInput")]
pub struct UpdateTaskArgs {
    pub title: Option<String>,
    pub description: MaybeUndefined<String>,
    pub status: Option<TaskStatusValue>,
    pub due_date: MaybeUndefined<String>,
}

fn owner_account(user: Option<User>) -> TaskResult<UserObject> {
    user.map(UserObject::from)
        .ok_or_else(|| TaskError::not_found("User not found"))
}

fn provided<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

impl From<UpdateTaskArgs> for UpdateTaskInput {
    fn from(args: UpdateTaskArgs) -> Self {
        Self {
            title: args.title,
            description: provided(args.description),
            status: args.status.map(Into::into),
            due_date: provided(args.due_date),
        }
    }
}

/// Attachment metadata
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "File")]
pub struct FileObject {
    pub id: ID,
    pub filename: String,
    pub mimetype: String,
    /// Size in bytes
    pub size: i32,
    pub created_at: DateTime<Utc>,
}

impl From<File> for FileObject {
    fn from(file: File) -> Self {
        Self {
            id: ID(file.file_id.to_string()),
            filename: file.filename,
            mimetype: file.mimetype,
            size: i32::try_from(file.size).unwrap_or(i32::MAX),
            created_at: file.created_at,
        }
    }
}

pub struct TaskObject(pub Task);

impl From<Task> for TaskObject {
    fn from(task: Task) -> Self {
        Self(task)
    }
}

#[Object(name = "Task")]
impl TaskObject {
    async fn id(&self) -> ID {
        ID(self.0.task_id.to_string())
    }

    async fn title(&self) -> &str {
        self.0.title.as_str()
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_ref().map(|d| d.as_str())
    }

    async fn status(&self) -> TaskStatusValue {
        self.0.status.into()
    }

    async fn due_date(&self) -> Option<DateTime<Utc>> {
        self.0.due_date
    }

    /// Owner of the task
    async fn user(&self, ctx: &Context<'_>) -> GqlResult<UserObject> {
        let auth = ctx.data::<PgAuthState>()?;

        let user = auth
            .users
            .find_by_id(&self.0.user_id)
            .await
            .into_graphql()?;
        owner_account(user).into_graphql()
    }

    async fn files(&self, ctx: &Context<'_>) -> GqlResult<Option<Vec<FileObject>>> {
        let state = ctx.data::<PgTaskState>()?;

        let files = state
            .files()
            .task_files(&self.0.task_id)
            .await
            .into_graphql()?;
        Ok(Some(files.into_iter().map(FileObject::from).collect()))
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

/// Task Query resolvers
#[derive(Default)]
pub struct TaskQuery;

#[Object]
impl TaskQuery {
    /// Tasks owned by the caller
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        filter: Option<TaskFilterArgs>,
    ) -> GqlResult<Vec<TaskObject>> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        let filter = TaskFilter::from(filter.unwrap_or_default());
        let tasks = state
            .tasks()
            .list_tasks(&principal.user_id, &filter)
            .await
            .into_graphql()?;
        Ok(tasks.into_iter().map(TaskObject).collect())
    }

    async fn task(&self, ctx: &Context<'_>, id: ID) -> GqlResult<TaskObject> {
        require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        let task = state.tasks().get_task(&id).await.into_graphql()?;
        Ok(TaskObject(task))
    }
}

/// Task Mutation resolvers
#[derive(Default)]
pub struct TaskMutation;

#[Object]
impl TaskMutation {
    async fn create_task(&self, ctx: &Context<'_>, input: CreateTaskArgs) -> GqlResult<TaskObject> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        let task = state
            .tasks()
            .create_task(principal.user_id, input.into())
            .await
            .into_graphql()?;
        Ok(TaskObject(task))
    }

    async fn update_task(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateTaskArgs,
    ) -> GqlResult<TaskObject> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        let task = state
            .tasks()
            .update_task(&id, principal.user_id, input.into())
            .await
            .into_graphql()?;
        Ok(TaskObject(task))
    }

    async fn delete_task(&self, ctx: &Context<'_>, id: ID) -> GqlResult<bool> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        state
            .tasks()
            .delete_task(&id, principal.user_id)
            .await
            .into_graphql()?;
        Ok(true)
    }

    async fn delete_file(&self, ctx: &Context<'_>, id: ID) -> GqlResult<bool> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgTaskState>()?;

        state
            .files()
            .delete_file(&id, principal.user_id)
            .await
            .into_graphql()?;
        Ok(true)
    }
}
