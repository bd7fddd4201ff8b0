use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use crate::{
    adapters::{dto::file_dto::FileInfoResponse, state::AppState},
    application::error::ApplicationError,
    domain::models::file::FileData,
};

pub struct FileController;

impl FileController {
    /// POST /api/files
    /// Multipart body with a `file` part. Only the first `file` part is
    /// stored; other parts are ignored.
    pub async fn upload_file(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<FileInfoResponse>, ApplicationError> {
        let mut upload: Option<FileData> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field.file_name().map(str::to_string);
            let content = field.bytes().await.map_err(multipart_error)?;
            upload = Some(FileData::new(content, filename));
            break;
        }

        let file_data = upload.ok_or_else(|| {
            warn!("Missing required 'file' part in upload");
            ApplicationError::BadRequest("Required part 'file' is not present".to_string())
        })?;

        let stored = app_state.storage_service.store(file_data).await?;
        Ok(Json(FileInfoResponse::from(stored)))
    }

    /// GET /api/files
    pub async fn list_files(
        State(app_state): State<AppState>,
    ) -> Result<Json<Vec<FileInfoResponse>>, ApplicationError> {
        let files = app_state.storage_service.list_all().await?;
        Ok(Json(files.into_iter().map(FileInfoResponse::from).collect()))
    }

    /// GET /api/files/{file_name}
    pub async fn download_file(
        State(app_state): State<AppState>,
        Path(file_name): Path<String>,
    ) -> Result<Response, ApplicationError> {
        let resource = app_state
            .storage_service
            .load_as_resource(&file_name)
            .await?;

        info!("Downloading file: {} ({} bytes)", resource.name, resource.size);

        let disposition = format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(&resource.name)
        );

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header(header::CONTENT_LENGTH, resource.size)
            .header(header::CONTENT_DISPOSITION, disposition)
            .body(Body::from_stream(ReaderStream::new(resource.file)))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))
    }

    /// DELETE /api/files/{file_name}
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(file_name): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        app_state.storage_service.delete(&file_name).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest("Invalid request format".to_string())
}
