use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
    /// Per-field messages, only present for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorDto>>,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageMetaDto {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Envelope for a single resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataDto<T> {
    pub data: T,
}

/// Envelope for mutations that report a message alongside the affected resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto<T> {
    pub message: String,
    pub data: T,
}

/// Envelope for paginated lists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub meta: PageMetaDto,
}

/// Body of mutations that only report a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusMessageDto {
    pub message: String,
}

/// Number of rows touched by a bulk operation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
