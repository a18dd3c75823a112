//! File Use Case
//!
//! Attachments on tasks. Bytes go through `FileStorage`, metadata through
//! `FileRepository`; the two are not transactional.

use std::sync::Arc;

use kernel::id::{TaskId, UserId};
use tracing::instrument;

use crate::application::ids::{parse_file_id, parse_task_id_or};
use crate::domain::entity::File;
use crate::domain::ownership::{OwnedAction, require_owner};
use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::storage::FileStorage;
use crate::domain::value_object::{FileName, FileSize, MAX_FILE_SIZE, MimeType};
use crate::error::{TaskError, TaskResult};

/// An uploaded file as received from a client
#[derive(Debug, Clone)]
pub struct UploadInput {
    pub filename: String,
    pub mimetype: String,
    /// Declared size in bytes
    pub size: u64,
    pub bytes: Vec<u8>,
}

/// File use case
pub struct FileUseCase<F, T, S>
where
    F: FileRepository,
    T: TaskRepository,
    S: FileStorage,
{
    file_repo: Arc<F>,
    task_repo: Arc<T>,
    storage: Arc<S>,
    max_file_size: u64,
}

impl<F, T, S> FileUseCase<F, T, S>
where
    F: FileRepository,
    T: TaskRepository,
    S: FileStorage,
{
    pub fn new(file_repo: Arc<F>, task_repo: Arc<T>, storage: Arc<S>) -> Self {
        Self {
            file_repo,
            task_repo,
            storage,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Lower the accepted size; values above the hard limit are clamped
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size.min(MAX_FILE_SIZE);
        self
    }

    /// Attach a file to a task owned by the caller
    #[instrument(skip(self, input), fields(user_id = %user_id, size = input.size))]
    pub async fn upload_file(
        &self,
        task_id: &str,
        user_id: UserId,
        input: UploadInput,
    ) -> TaskResult<File> {
        let filename = FileName::new(input.filename)?;
        let size = FileSize::new(input.size, self.max_file_size)?;
        let mimetype = MimeType::new(input.mimetype)?;

        let task_id = parse_task_id_or(task_id, |_| "Task not found".to_string())?;
        let task = self
            .task_repo
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| TaskError::not_found("Task not found"))?;

        require_owner(&task.user_id, &user_id, OwnedAction::UploadFile)?;

        let path = self.storage.store(filename.as_str(), &input.bytes).await?;
        let file = File::new(task.task_id, filename, mimetype, size, path);

        if let Err(e) = self.file_repo.create(&file).await {
            tracing::error!(
                file_id = %file.file_id,
                path = %file.path,
                error = %e,
                "File stored but record could not be saved"
            );
            return Err(e);
        }

        tracing::info!(file_id = %file.file_id, task_id = %file.task_id, "File uploaded");
        Ok(file)
    }

    /// Remove an attachment; only the owner of its task may do so
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_file(&self, file_id: &str, user_id: UserId) -> TaskResult<()> {
        let file_id = parse_file_id(file_id)?;
        let file = self
            .file_repo
            .find_by_id(&file_id)
            .await?
            .ok_or_else(|| TaskError::not_found("File not found"))?;

        let task = self
            .task_repo
            .find_by_id(&file.task_id)
            .await?
            .ok_or_else(|| TaskError::not_found("Task not found"))?;

        require_owner(&task.user_id, &user_id, OwnedAction::DeleteFile)?;

        self.storage.delete(&file.path).await?;

        match self.file_repo.delete(&file.file_id).await {
            Ok(true) => {
                tracing::info!(file_id = %file.file_id, "File deleted");
                Ok(())
            }
            Ok(false) => Err(TaskError::not_found("File not found")),
            Err(e) => {
                tracing::error!(
                    file_id = %file.file_id,
                    path = %file.path,
                    error = %e,
                    "Stored file removed but record remains (orphaned record)"
                );
                Err(e)
            }
        }
    }

    /// Files attached to a task
    pub async fn task_files(&self, task_id: &TaskId) -> TaskResult<Vec<File>> {
        self.file_repo.find_by_task_id(task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{NewTask, Task};
    use crate::domain::value_object::{TaskStatus, TaskTitle};
    use crate::testing::{InMemoryFileRepository, InMemoryFileStorage, InMemoryTaskRepository};
    use kernel::error::kind::ErrorKind;

    type TestUseCase =
        FileUseCase<InMemoryFileRepository, InMemoryTaskRepository, InMemoryFileStorage>;

    struct Fixture {
        files: Arc<InMemoryFileRepository>,
        tasks: Arc<InMemoryTaskRepository>,
        storage: Arc<InMemoryFileStorage>,
        uc: TestUseCase,
    }

    fn fixture() -> Fixture {
        let files = Arc::new(InMemoryFileRepository::default());
        let tasks = Arc::new(InMemoryTaskRepository::default());
        let storage = Arc::new(InMemoryFileStorage::default());
        let uc = FileUseCase::new(Arc::clone(&files), Arc::clone(&tasks), Arc::clone(&storage));
        Fixture {
            files,
            tasks,
            storage,
            uc,
        }
    }

    fn owned_task(tasks: &InMemoryTaskRepository, owner: UserId) -> Task {
        let task = Task::new(
            owner,
            NewTask {
                title: TaskTitle::new("With files").unwrap(),
                description: None,
                status: TaskStatus::Pending,
                due_date: None,
            },
        );
        tasks.insert(task.clone());
        task
    }

    fn upload(size: u64, mimetype: &str) -> UploadInput {
        UploadInput {
            filename: "notes.txt".into(),
            mimetype: mimetype.into(),
            size,
            bytes: vec![b'a'; size.min(16) as usize],
        }
    }

    #[tokio::test]
    async fn test_upload_file_success() {
        let f = fixture();
        let owner = UserId::new();
        let task = owned_task(&f.tasks, owner);

        let file = f
            .uc
            .upload_file(&task.task_id.to_string(), owner, upload(12, "text/plain"))
            .await
            .unwrap();

        assert_eq!(file.task_id, task.task_id);
        assert_eq!(file.filename, "notes.txt");
        assert_eq!(file.size, 12);
        assert!(f.storage.contains(&file.path));
        assert_eq!(f.uc.task_files(&task.task_id).await.unwrap(), vec![file]);
    }

    #[tokio::test]
    async fn test_upload_size_boundaries() {
        let f = fixture();
        let owner = UserId::new();
        let task_id = owned_task(&f.tasks, owner).task_id.to_string();

        f.uc
            .upload_file(&task_id, owner, upload(MAX_FILE_SIZE, "application/pdf"))
            .await
            .unwrap();

        for size in [0, MAX_FILE_SIZE + 1] {
            let err = f
                .uc
                .upload_file(&task_id, owner, upload(size, "application/pdf"))
                .await
                .unwrap_err();
            assert!(matches!(err, TaskError::Validation(ref m) if m == "Invalid file size"));
        }
        assert_eq!(f.files.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_mimetype_regardless_of_size() {
        let f = fixture();
        let owner = UserId::new();
        let task_id = owned_task(&f.tasks, owner).task_id.to_string();

        for size in [1, 1024, MAX_FILE_SIZE] {
            let err = f
                .uc
                .upload_file(&task_id, owner, upload(size, "application/x-msdownload"))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "File type not allowed");
        }
        assert_eq!(f.storage.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_filename() {
        let f = fixture();
        let owner = UserId::new();
        let task_id = owned_task(&f.tasks, owner).task_id.to_string();

        let input = UploadInput {
            filename: "  ".into(),
            ..upload(4, "text/plain")
        };
        let err = f.uc.upload_file(&task_id, owner, input).await.unwrap_err();
        assert_eq!(err.to_string(), "Filename cannot be empty");
    }

    #[tokio::test]
    async fn test_upload_to_missing_task() {
        let f = fixture();
        for task_id in [TaskId::new().to_string(), "task-1".to_string()] {
            let err = f
                .uc
                .upload_file(&task_id, UserId::new(), upload(4, "text/plain"))
                .await
                .unwrap_err();
            assert!(matches!(err, TaskError::NotFound(ref m) if m == "Task not found"));
        }
    }

    #[tokio::test]
    async fn test_upload_by_non_owner_stores_nothing() {
        let f = fixture();
        let task_id = owned_task(&f.tasks, UserId::new()).task_id.to_string();

        let err = f
            .uc
            .upload_file(&task_id, UserId::new(), upload(4, "image/png"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.to_string(), "Not authorized to upload to this task");
        assert_eq!(f.storage.len(), 0);
        assert_eq!(f.files.len(), 0);
    }

    async fn uploaded(f: &Fixture, owner: UserId) -> File {
        let task_id = owned_task(&f.tasks, owner).task_id.to_string();
        f.uc
            .upload_file(&task_id, owner, upload(8, "image/gif"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_file_removes_bytes_and_record() {
        let f = fixture();
        let owner = UserId::new();
        let file = uploaded(&f, owner).await;

        f.uc
            .delete_file(&file.file_id.to_string(), owner)
            .await
            .unwrap();

        assert!(!f.storage.contains(&file.path));
        assert_eq!(f.files.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_file_by_non_owner_never_deletes() {
        let f = fixture();
        let file = uploaded(&f, UserId::new()).await;

        let err = f
            .uc
            .delete_file(&file.file_id.to_string(), UserId::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not authorized to delete this file");
        assert_eq!(f.storage.delete_calls(), 0);
        assert_eq!(f.files.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_file_not_found() {
        let f = fixture();
        let err = f
            .uc
            .delete_file(&kernel::id::FileId::new().to_string(), UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found");

        let err = f.uc.delete_file("", UserId::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_delete_file_of_missing_task() {
        let f = fixture();
        let owner = UserId::new();
        let file = uploaded(&f, owner).await;
        f.tasks.remove(&file.task_id);

        let err = f
            .uc
            .delete_file(&file.file_id.to_string(), owner)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Task not found");
        assert_eq!(f.storage.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_record() {
        let f = fixture();
        let owner = UserId::new();
        let file = uploaded(&f, owner).await;
        f.storage.fail_deletes();

        let err = f
            .uc
            .delete_file(&file.file_id.to_string(), owner)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(f.files.delete_calls(), 0);
        assert_eq!(f.files.len(), 1);
    }

    #[tokio::test]
    async fn test_with_max_file_size_is_clamped() {
        let f = fixture();
        let uc = f.uc.with_max_file_size(u64::MAX);
        assert_eq!(uc.max_file_size, MAX_FILE_SIZE);
    }
}
