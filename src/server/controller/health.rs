use axum::Json;

use crate::model::api::HealthDto;

pub static HEALTH_TAG: &str = "health";

/// Liveness probe. Always public.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}
