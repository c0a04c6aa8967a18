//! Uploaded file metadata and per-category upload rules.

use chrono::{DateTime, Utc};

use crate::model::file::{FileDto, UpdateFileDto};
use entity::enums::FileCategory;

const MIB: usize = 1024 * 1024;

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const SPREADSHEET_TYPES: &[&str] = &[
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
];

/// Upload limits for a file category.
pub trait UploadRules {
    /// Sub-directory of the upload root holding files of this category.
    fn directory(&self) -> &'static str;
    fn max_size(&self) -> usize;
    fn allows(&self, mime_type: &str) -> bool;
}

impl UploadRules for FileCategory {
    fn directory(&self) -> &'static str {
        match self {
            FileCategory::DeliveryDocument => "delivery_document",
            FileCategory::MaterialDocument => "material_document",
            FileCategory::RequestDocument => "request_document",
        }
    }

    fn max_size(&self) -> usize {
        match self {
            FileCategory::DeliveryDocument => 10 * MIB,
            FileCategory::MaterialDocument | FileCategory::RequestDocument => 5 * MIB,
        }
    }

    fn allows(&self, mime_type: &str) -> bool {
        match self {
            FileCategory::DeliveryDocument | FileCategory::RequestDocument => {
                DOCUMENT_TYPES.contains(&mime_type)
            }
            FileCategory::MaterialDocument => {
                DOCUMENT_TYPES.contains(&mime_type) || SPREADSHEET_TYPES.contains(&mime_type)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub id: i32,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub category: FileCategory,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredFile {
    /// Converts an entity model at the repository boundary.
    ///
    /// Tags that are not a JSON array of strings are treated as empty.
    pub fn from_entity(entity: entity::file::Model) -> Self {
        let tags = serde_json::from_value(entity.tags).unwrap_or_default();

        Self {
            id: entity.id,
            file_name: entity.file_name,
            original_name: entity.original_name,
            mime_type: entity.mime_type,
            size: entity.size,
            path: entity.path,
            category: entity.category,
            description: entity.description,
            tags,
            uploaded_by: entity.uploaded_by,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> FileDto {
        FileDto {
            id: self.id,
            file_name: self.file_name,
            original_name: self.original_name,
            mime_type: self.mime_type,
            size: self.size,
            category: self.category,
            description: self.description,
            tags: self.tags,
            uploaded_by: self.uploaded_by,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A file received from a multipart upload, not yet written to disk.
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub category: FileCategory,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreateFileParams {
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub category: FileCategory,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFileParams {
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl UpdateFileParams {
    pub fn from_dto(dto: UpdateFileDto) -> Self {
        Self {
            description: dto.description,
            tags: dto.tags,
            is_active: dto.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_documents_allow_ten_mebibytes() {
        assert_eq!(FileCategory::DeliveryDocument.max_size(), 10 * MIB);
        assert_eq!(FileCategory::RequestDocument.max_size(), 5 * MIB);
    }

    #[test]
    fn spreadsheets_only_allowed_for_material_documents() {
        let xlsx = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

        assert!(FileCategory::MaterialDocument.allows(xlsx));
        assert!(!FileCategory::DeliveryDocument.allows(xlsx));
        assert!(FileCategory::DeliveryDocument.allows("application/pdf"));
        assert!(!FileCategory::RequestDocument.allows("application/x-msdownload"));
    }
}
