//! HTTP Handlers

use axum::extract::{Multipart, State, multipart::MultipartError};
use axum::{Extension, Json};

use auth::Principal;

use crate::application::UploadInput;
use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::storage::FileStorage;
use crate::error::{TaskError, TaskResult};
use crate::presentation::dto::UploadResponse;
use crate::presentation::state::TaskState;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Reduce a part's `Content-Type` to a lower-cased bare `type/subtype`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn malformed(e: MultipartError) -> TaskError {
    tracing::debug!(error = %e, "Malformed multipart body");
    TaskError::Validation(e.body_text())
}

/// POST /upload
///
/// Multipart form with a `file` part and a `taskId` field. The caller's
/// [`Principal`] is provided by the bearer middleware.
pub async fn upload_file<R, S>(
    State(state): State<TaskState<R, S>>,
    Extension(principal): Extension<Principal>,
    mut multipart: Multipart,
) -> TaskResult<Json<UploadResponse>>
where
    R: TaskRepository + FileRepository + Send + Sync + 'static,
    S: FileStorage + Send + Sync + 'static,
{
    let mut task_id: Option<String> = None;
    let mut upload: Option<UploadInput> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("taskId") => {
                task_id = Some(field.text().await.map_err(malformed)?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let mimetype = essence(field.content_type().unwrap_or(FALLBACK_MIME_TYPE));
                let bytes = field.bytes().await.map_err(malformed)?;

                upload = Some(UploadInput {
                    filename,
                    mimetype,
                    size: bytes.len() as u64,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| TaskError::validation("No file uploaded"))?;
    let task_id = task_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| TaskError::validation("Task ID is required"))?;

    let file = state
        .files()
        .upload_file(&task_id, principal.user_id, upload)
        .await?;

    Ok(Json(file.into()))
}
