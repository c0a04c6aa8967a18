//! Per-IP rate limiting with `tower_governor`.
//!
//! The governor key extractor reads the peer address from `ConnectInfo`, so these layers
//! only work on a router served with `into_make_service_with_connect_info`.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    model::api::ErrorDto,
    server::{
        config::RateLimit,
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

/// Wraps `router` in a token bucket limiter keyed on the client IP.
///
/// # Arguments
/// - `router` - Routes to protect
/// - `limit` - Burst size and replenish interval
///
/// # Returns
/// - `Ok(OpenApiRouter)` - The limited router
/// - `Err(AppError::ConfigErr)` - Burst or interval is zero
pub fn limit(
    router: OpenApiRouter<AppState>,
    limit: RateLimit,
) -> Result<OpenApiRouter<AppState>, AppError> {
    let config = GovernorConfigBuilder::default()
        .per_second(limit.replenish_secs)
        .burst_size(limit.burst)
        .finish()
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "RATE_LIMIT".to_string(),
            value: format!("{}s / {}", limit.replenish_secs, limit.burst),
        })?;

    Ok(router.layer(GovernorLayer::new(Arc::new(config))))
}

/// Replaces the plain text body of governor rejections with the JSON error body.
pub async fn json_rejection(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_TYPE);
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);

    let body = Json(ErrorDto::new("Too many requests, please try again later"));
    (parts, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rewrites_rejections_as_json() {
        let rejected = (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests!").into_response();

        let response = json_rejection(rejected).await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn leaves_other_responses_alone() {
        let ok = (StatusCode::OK, "fine").into_response();

        let response = json_rejection(ok).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
