use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization` header.
    #[error("No token provided")]
    MissingToken,

    /// `Authorization` header is present but not of the form `Bearer <token>`.
    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// Token signature is valid but `exp` lies in the past.
    #[error("Token expired")]
    TokenExpired,

    /// Token could not be decoded or its signature does not match.
    #[error("Invalid token")]
    InvalidToken,

    /// Token subject no longer exists or the account was deactivated.
    #[error("User not found")]
    UserNotFound(i32),

    /// Authenticated user's role is not allowed to perform the operation.
    #[error("Insufficient permissions")]
    InsufficientPermissions(i32),

    /// Unknown username, inactive account or wrong password at login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password did not match when changing the password.
    #[error("Current password is incorrect")]
    IncorrectPassword,
}

/// Converts authentication errors into HTTP responses.
///
/// - `InsufficientPermissions` → 403 Forbidden
/// - every other variant → 401 Unauthorized
///
/// The error's display text is the client-facing message. Every rejection is logged
/// at debug level.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected authentication: {:?}", self);

        let status = match self {
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };

        (status, Json(ErrorDto::new(self.to_string()))).into_response()
    }
}
