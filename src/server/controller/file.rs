//! Uploaded documents: single and batch multipart uploads, metadata edits, download and
//! inline preview.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto, StatusMessageDto},
        file::{FileDto, UpdateFileDto, UploadFileForm, UploadFilesForm},
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            file::{UpdateFileParams, Upload},
            pagination::Pagination,
        },
        service::file::FileService,
        state::AppState,
    },
};
use entity::enums::FileCategory;

pub static FILE_TAG: &str = "file";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileQuery {
    pub category: Option<FileCategory>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/files",
    tag = FILE_TAG,
    params(FileQuery),
    responses(
        (status = 200, description = "Page of files", body = PaginatedDto<FileDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_files(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<FileQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let page = FileService::new(&state.db, &state.upload_dir)
        .get_paginated(query.category, Pagination::new(query.page, query.per_page))
        .await?;

    Ok(Json(page.into_dto(|f| f.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = FILE_TAG,
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 200, description = "File metadata", body = DataDto<FileDto>),
        (status = 404, description = "File not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let file = FileService::new(&state.db, &state.upload_dir)
        .get_by_id(id)
        .await?;

    Ok(data(file.into_dto()))
}

/// Upload a document.
///
/// Expects a `file` part plus optional `category`, `description` and `tags` fields.
/// `tags` is a JSON array of strings. Unknown parts are ignored.
///
/// # Access Control
/// - `Admin`, `Engineer`
///
/// # Returns
/// - `201 Created` - The stored file's metadata
/// - `400 Bad Request` - Missing or empty file, disallowed type, too large, or malformed fields
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = FILE_TAG,
    request_body(content = UploadFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded", body = MessageDto<FileDto>),
        (status = 400, description = "Upload rejected", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn upload_file(
    State(state): State<AppState>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let Some(upload) = UploadForm::read(multipart, "file").await?.into_uploads().pop() else {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    };

    let stored = FileService::new(&state.db, &state.upload_dir)
        .upload(user.id, upload)
        .await?;

    Ok((
        StatusCode::CREATED,
        message("File uploaded successfully", stored.into_dto()),
    ))
}

/// Upload several documents with one shared category, description and tags.
///
/// Expects up to 10 `files` parts. Every file is checked before any is stored.
///
/// # Access Control
/// - `Admin`, `Engineer`
///
/// # Returns
/// - `201 Created` - Metadata of every stored file
/// - `400 Bad Request` - No files, more than 10, or any file rejected by the upload checks
#[utoipa::path(
    post,
    path = "/api/files/upload/multiple",
    tag = FILE_TAG,
    request_body(content = UploadFilesForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Files uploaded", body = MessageDto<Vec<FileDto>>),
        (status = 400, description = "Upload rejected", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn upload_files(
    State(state): State<AppState>,
    token: BearerToken,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let uploads = UploadForm::read(multipart, "files").await?.into_uploads();

    let stored = FileService::new(&state.db, &state.upload_dir)
        .upload_many(user.id, uploads)
        .await?;

    Ok((
        StatusCode::CREATED,
        message(
            "Files uploaded successfully",
            stored.into_iter().map(|f| f.into_dto()).collect::<Vec<_>>(),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/files/{id}",
    tag = FILE_TAG,
    params(("id" = i32, Path, description = "File ID")),
    request_body = UpdateFileDto,
    responses(
        (status = 200, description = "File updated", body = MessageDto<FileDto>),
        (status = 404, description = "File not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFileDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let file = FileService::new(&state.db, &state.upload_dir)
        .update(id, UpdateFileParams::from_dto(payload))
        .await?;

    Ok(message("File updated successfully", file.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = FILE_TAG,
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 200, description = "File deleted", body = StatusMessageDto),
        (status = 404, description = "File not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    FileService::new(&state.db, &state.upload_dir)
        .delete(id)
        .await?;

    Ok(status_message("File deleted successfully"))
}

/// Download a file's contents as an attachment under its original name.
#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    tag = FILE_TAG,
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn download_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let (file, bytes) = FileService::new(&state.db, &state.upload_dir)
        .read(id)
        .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.original_name.replace(['"', '\\', '\r', '\n'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// Show a file's contents inline, without an attachment disposition.
#[utoipa::path(
    get,
    path = "/api/files/{id}/preview",
    tag = FILE_TAG,
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn preview_file(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Engineering])
        .await?;

    let (file, bytes) = FileService::new(&state.db, &state.upload_dir)
        .read(id)
        .await?;

    Ok(([(header::CONTENT_TYPE, file.mime_type)], bytes))
}

/// Fields of an upload form. Every part named like the file field becomes one upload;
/// the remaining fields apply to all of them.
#[derive(Default)]
struct UploadForm {
    files: Vec<(String, String, Vec<u8>)>,
    category: FileCategory,
    description: Option<String>,
    tags: Vec<String>,
}

impl UploadForm {
    /// Reads every part of `multipart`. Unknown parts are ignored.
    async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);

            match name.as_deref() {
                Some(name) if name == file_field => {
                    let original_name = field.file_name().unwrap_or("upload").to_string();
                    let mime_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_MIME_TYPE)
                        .to_string();
                    let bytes = field.bytes().await?.to_vec();
                    form.files.push((original_name, mime_type, bytes));
                }
                Some("category") => {
                    let value = field.text().await?;
                    form.category = parse_category(&value)?;
                }
                Some("description") => {
                    let value = field.text().await?;
                    let value = value.trim();
                    if !value.is_empty() {
                        form.description = Some(value.to_string());
                    }
                }
                Some("tags") => {
                    let value = field.text().await?;
                    form.tags = parse_tags(&value)?;
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_uploads(self) -> Vec<Upload> {
        let Self {
            files,
            category,
            description,
            tags,
        } = self;

        files
            .into_iter()
            .map(|(original_name, mime_type, bytes)| Upload {
                original_name,
                mime_type,
                bytes,
                category,
                description: description.clone(),
                tags: tags.clone(),
            })
            .collect()
    }
}

fn parse_category(value: &str) -> Result<FileCategory, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(FileCategory::default());
    }

    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| AppError::invalid_field("category", format!("Unknown category '{}'", value)))
}

fn parse_tags(value: &str) -> Result<Vec<String>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(value)
        .map_err(|_| AppError::invalid_field("tags", "Tags must be a JSON array of strings"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_defaults_when_blank() {
        assert_eq!(parse_category("  ").unwrap(), FileCategory::DeliveryDocument);
    }

    #[test]
    fn category_parses_snake_case() {
        assert_eq!(
            parse_category("material_document").unwrap(),
            FileCategory::MaterialDocument
        );
        assert!(parse_category("MaterialDocument").is_err());
    }

    #[test]
    fn tags_must_be_string_array() {
        assert_eq!(
            parse_tags(r#"["invoice","march"]"#).unwrap(),
            vec!["invoice".to_string(), "march".to_string()]
        );
        assert!(parse_tags("invoice, march").is_err());
        assert!(parse_tags("").unwrap().is_empty());
    }
}
