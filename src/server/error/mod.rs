//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::{
    model::api::{ErrorDto, FieldErrorDto},
    server::error::{auth::AuthError, config::ConfigError},
};

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. `AuthError` handles its own response mapping, while the plain
/// variants map onto standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// Unique and foreign key constraint violations become 400 Bad Request, everything
    /// else is a 500 Internal Server Error with details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Password hashing failure.
    #[error(transparent)]
    BcryptErr(#[from] bcrypt::BcryptError),

    /// Token encoding failure. Decoding failures surface as `AuthError` instead.
    #[error(transparent)]
    JwtErr(#[from] jsonwebtoken::errors::Error),

    /// Filesystem error while storing or reading uploads.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed multipart upload body.
    ///
    /// Results in 400 Bad Request.
    #[error(transparent)]
    MultipartErr(#[from] axum::extract::multipart::MultipartError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// One or more request fields failed validation.
    ///
    /// Results in 400 Bad Request with a `details` entry per field.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The targeted row changed between read and write.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `BadRequest`, `Validation`, `MultipartErr`, unique and foreign key violations
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - 500 Internal Server Error - everything else
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::Conflict(msg) => (StatusCode::CONFLICT, Json(ErrorDto::new(msg))).into_response(),
            Self::Validation(errors) => {
                let details = errors
                    .into_iter()
                    .map(|e| FieldErrorDto {
                        field: e.field,
                        message: e.message,
                    })
                    .collect();

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "Validation failed".to_string(),
                        details: Some(details),
                    }),
                )
                    .into_response()
            }
            Self::MultipartErr(err) => {
                tracing::debug!("Rejected multipart body: {}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto::new("Invalid multipart body")),
                )
                    .into_response()
            }
            Self::DbErr(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::debug!("Unique constraint violation: {}", detail);
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorDto::new("Resource already exists")),
                    )
                        .into_response()
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    tracing::debug!("Foreign key constraint violation: {}", detail);
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorDto::new("Resource is referenced by other records")),
                    )
                        .into_response()
                }
                _ => InternalServerError(err).into_response(),
            },
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto::new("Internal server error")),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message
/// to the client. Used as a fallback for errors without a specific HTTP mapping.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
