use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use entity::enums::FileCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileDto {
    pub id: i32,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub category: FileCategory,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFileDto {
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Multipart form accepted by the upload endpoint. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub category: Option<FileCategory>,
    pub description: Option<String>,
    /// JSON array of strings.
    pub tags: Option<String>,
}

/// Multipart form accepted by the batch upload endpoint. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFilesForm {
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
    pub category: Option<FileCategory>,
    pub description: Option<String>,
    /// JSON array of strings.
    pub tags: Option<String>,
}
