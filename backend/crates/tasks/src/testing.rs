//! In-memory test doubles

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};

use kernel::id::{FileId, TaskId, UserId};

use crate::domain::entity::{File, Task};
use crate::domain::filter::{SortOrder, TaskFilter, TaskSortField};
use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::storage::FileStorage;
use crate::error::{TaskError, TaskResult};

/// Tasks kept in insertion order
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<Vec<Task>>,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryTaskRepository {
    pub fn insert(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }

    pub fn remove(&self, task_id: &TaskId) {
        self.tasks.lock().unwrap().retain(|t| &t.task_id != task_id);
    }

    pub fn get(&self, task_id: &TaskId) -> Option<Task> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.task_id == task_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(AtomicOrdering::SeqCst)
    }

    fn newest_first(&self, user_id: &UserId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }
}

fn matches_search(task: &Task, term: &str) -> bool {
    let term = term.to_lowercase();
    let due = task
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    [
        task.title.as_str(),
        task.description.as_ref().map(|d| d.as_str()).unwrap_or(""),
        task.status.as_str(),
        due.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

fn compare(a: &Task, b: &Task, field: TaskSortField, order: SortOrder) -> Ordering {
    let directed = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };
    match field {
        TaskSortField::Title => directed(
            a.title
                .as_str()
                .to_lowercase()
                .cmp(&b.title.as_str().to_lowercase()),
        ),
        TaskSortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        TaskSortField::Status => directed(a.status.rank().cmp(&b.status.rank())),
        TaskSortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
    }
}

impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskResult<()> {
        self.insert(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskResult<()> {
        self.update_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.task_id == task.task_id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(())
            }
            None => Err(TaskError::not_found("Task not found")),
        }
    }

    async fn find_by_id(&self, task_id: &TaskId) -> TaskResult<Option<Task>> {
        Ok(self.get(task_id))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> TaskResult<Vec<Task>> {
        Ok(self.newest_first(user_id))
    }

    async fn search(&self, user_id: &UserId, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .newest_first(user_id)
            .into_iter()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| {
                filter
                    .due_on
                    .is_none_or(|day| t.due_date.is_some_and(|d| d.date_naive() == day))
            })
            .filter(|t| filter.search_term().is_none_or(|term| matches_search(t, term)))
            .collect();

        if let Some(sort) = filter.sort {
            tasks.sort_by(|a, b| compare(a, b, sort.field, sort.order));
        }
        Ok(tasks)
    }

    async fn delete(&self, task_id: &TaskId) -> TaskResult<bool> {
        self.delete_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| &t.task_id != task_id);
        Ok(tasks.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryFileRepository {
    files: Mutex<Vec<File>>,
    delete_calls: AtomicUsize,
}

impl InMemoryFileRepository {
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(AtomicOrdering::SeqCst)
    }
}

impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: &File) -> TaskResult<()> {
        self.files.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn find_by_id(&self, file_id: &FileId) -> TaskResult<Option<File>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.file_id == file_id)
            .cloned())
    }

    async fn find_by_task_id(&self, task_id: &TaskId) -> TaskResult<Vec<File>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| &f.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, file_id: &FileId) -> TaskResult<bool> {
        self.delete_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| &f.file_id != file_id);
        Ok(files.len() != before)
    }
}

/// Blob store keyed by locator
#[derive(Default)]
pub struct InMemoryFileStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    counter: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_deletes: AtomicBool,
}

impl InMemoryFileStorage {
    pub fn contains(&self, locator: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(locator)
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(AtomicOrdering::SeqCst)
    }

    /// Make every subsequent delete fail with an I/O error
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, AtomicOrdering::SeqCst);
    }
}

impl FileStorage for InMemoryFileStorage {
    async fn store(&self, filename: &str, bytes: &[u8]) -> TaskResult<String> {
        let n = self.counter.fetch_add(1, AtomicOrdering::SeqCst);
        let locator = format!("mem/{n}-{filename}");
        self.blobs
            .lock()
            .unwrap()
            .insert(locator.clone(), bytes.to_vec());
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> TaskResult<()> {
        self.delete_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_deletes.load(AtomicOrdering::SeqCst) {
            return Err(TaskError::Storage(std::io::Error::other("storage offline")));
        }
        self.blobs.lock().unwrap().remove(locator);
        Ok(())
    }

    async fn exists(&self, locator: &str) -> TaskResult<bool> {
        Ok(self.contains(locator))
    }
}

/// Task and file fakes behind one handle, as `PgTaskRepository` serves both
#[derive(Default)]
pub struct InMemoryRepository {
    pub tasks: InMemoryTaskRepository,
    pub files: InMemoryFileRepository,
}

impl TaskRepository for InMemoryRepository {
    async fn create(&self, task: &Task) -> TaskResult<()> {
        TaskRepository::create(&self.tasks, task).await
    }

    async fn update(&self, task: &Task) -> TaskResult<()> {
        self.tasks.update(task).await
    }

    async fn find_by_id(&self, task_id: &TaskId) -> TaskResult<Option<Task>> {
        TaskRepository::find_by_id(&self.tasks, task_id).await
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> TaskResult<Vec<Task>> {
        self.tasks.find_by_user_id(user_id).await
    }

    async fn search(&self, user_id: &UserId, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        self.tasks.search(user_id, filter).await
    }

    async fn delete(&self, task_id: &TaskId) -> TaskResult<bool> {
        TaskRepository::delete(&self.tasks, task_id).await
    }
}

impl FileRepository for InMemoryRepository {
    async fn create(&self, file: &File) -> TaskResult<()> {
        FileRepository::create(&self.files, file).await
    }

    async fn find_by_id(&self, file_id: &FileId) -> TaskResult<Option<File>> {
        FileRepository::find_by_id(&self.files, file_id).await
    }

    async fn find_by_task_id(&self, task_id: &TaskId) -> TaskResult<Vec<File>> {
        self.files.find_by_task_id(task_id).await
    }

    async fn delete(&self, file_id: &FileId) -> TaskResult<bool> {
        FileRepository::delete(&self.files, file_id).await
    }
}
