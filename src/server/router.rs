//! Route table, OpenAPI document and the HTTP layer stack.
//!
//! Handlers are registered through `utoipa_axum::routes!` so the OpenAPI document is
//! collected from the same annotations that define the routes. [`router`] builds the
//! application without rate limiting, which is what tests drive with `oneshot`.
//! [`rate_limited_router`] adds the per-IP limiters and is used by `main`.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{from_fn_with_state, map_response},
    response::IntoResponse,
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::api::ErrorDto,
    server::{
        config::Config,
        controller::{
            auth, delivery, employee, file, health, institution, inventory, material,
            notification, project, request, role, statistics, stock_movement, uom, user,
            warehouse,
        },
        error::{config::ConfigError, AppError},
        middleware::{
            cache::response_cache,
            rate_limit::{self, json_rejection},
        },
        service::file::MAX_BATCH_FILES,
        state::AppState,
    },
};

/// Request body ceiling for uploads: the largest per-category limit plus multipart framing.
const MAX_UPLOAD_BODY: usize = 11 * 1024 * 1024;
/// Request body ceiling for batch uploads of up to `MAX_BATCH_FILES` files.
const MAX_BATCH_UPLOAD_BODY: usize = MAX_BATCH_FILES * 10 * 1024 * 1024 + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Depot API",
        description = "Warehouse and site material management"
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and profile"),
        (name = "user", description = "User accounts (admin)"),
        (name = "role", description = "Account and employee roles"),
        (name = "employee", description = "Site employees"),
        (name = "project", description = "Projects and their members"),
        (name = "uom", description = "Units of measure"),
        (name = "institution", description = "Owning institutions"),
        (name = "warehouse", description = "Warehouses"),
        (name = "material", description = "Material catalogue and stock"),
        (name = "request", description = "Material requests"),
        (name = "delivery", description = "Request deliveries"),
        (name = "inventory", description = "Inventory items, reserves and transactions"),
        (name = "stock_movement", description = "Material stock ledger"),
        (name = "notification", description = "Per-user notifications"),
        (name = "file", description = "Uploaded documents"),
        (name = "statistics", description = "Reports"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by every protected operation.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application router with permissive CORS and no rate limiting.
pub fn router(state: AppState) -> Router {
    let (auth, api) = api_routes();

    finish(state, auth.merge(api), CorsLayer::permissive())
}

/// Builds the served router: configured CORS plus the general and `/api/auth` limiters.
///
/// Must be served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Returns
/// - `Ok(Router)` - Ready to serve
/// - `Err(AppError::ConfigErr)` - Invalid CORS origin or rate limit settings
pub fn rate_limited_router(state: AppState, config: &Config) -> Result<Router, AppError> {
    let (auth, api) = api_routes();

    let auth = rate_limit::limit(auth, config.auth_rate_limit)?;
    let routes = rate_limit::limit(auth.merge(api), config.rate_limit)?;

    let cors = cors_layer(config.cors_origin.as_deref())?;

    Ok(finish(state, routes, cors).layer(map_response(json_rejection)))
}

/// Returns the `/api/auth` routes and every other API route separately so the auth
/// routes can carry their own limiter.
fn api_routes() -> (OpenApiRouter<AppState>, OpenApiRouter<AppState>) {
    let auth = OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::profile))
        .routes(routes!(auth::change_password));

    let files = OpenApiRouter::new()
        .routes(routes!(file::get_files))
        .routes(routes!(file::upload_file))
        .routes(routes!(file::get_file, file::update_file, file::delete_file))
        .routes(routes!(file::download_file))
        .routes(routes!(file::preview_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY));

    let batch_files = OpenApiRouter::new()
        .routes(routes!(file::upload_files))
        .layer(DefaultBodyLimit::max(MAX_BATCH_UPLOAD_BODY));

    let api = OpenApiRouter::new()
        .routes(routes!(health::health))
        // Users and roles
        .routes(routes!(user::get_users, user::create_user))
        .routes(routes!(user::get_user, user::update_user, user::delete_user))
        .routes(routes!(role::get_roles, role::create_role))
        .routes(routes!(role::get_role, role::update_role, role::delete_role))
        .routes(routes!(employee::get_employees, employee::create_employee))
        .routes(routes!(
            employee::get_employee,
            employee::update_employee,
            employee::delete_employee
        ))
        // Projects
        .routes(routes!(project::get_projects, project::create_project))
        .routes(routes!(
            project::get_project,
            project::update_project,
            project::delete_project
        ))
        .routes(routes!(project::get_project_users, project::add_project_user))
        .routes(routes!(project::remove_project_user))
        .routes(routes!(
            project::get_project_employees,
            project::add_project_employee
        ))
        .routes(routes!(project::remove_project_employee))
        // Reference data
        .routes(routes!(uom::get_uoms, uom::create_uom))
        .routes(routes!(
            institution::get_institutions,
            institution::create_institution
        ))
        .routes(routes!(
            institution::update_institution,
            institution::delete_institution
        ))
        .routes(routes!(warehouse::get_warehouses, warehouse::create_warehouse))
        .routes(routes!(
            warehouse::get_warehouse,
            warehouse::update_warehouse,
            warehouse::delete_warehouse
        ))
        // Materials and stock
        .routes(routes!(material::get_materials, material::create_material))
        .routes(routes!(
            material::get_material,
            material::update_material,
            material::delete_material
        ))
        .routes(routes!(material::update_stock))
        .routes(routes!(material::get_attributes, material::add_attribute))
        .routes(routes!(material::delete_attribute))
        .routes(routes!(stock_movement::get_stock_movements))
        // Requests and deliveries
        .routes(routes!(request::get_requests, request::create_request))
        .routes(routes!(request::get_request, request::update_request))
        .routes(routes!(request::update_request_status))
        .routes(routes!(delivery::get_deliveries))
        .routes(routes!(delivery::complete_delivery))
        .routes(routes!(delivery::update_delivery_status))
        // Inventory
        .routes(routes!(inventory::get_inventory, inventory::create_inventory))
        .routes(routes!(
            inventory::get_inventory_items,
            inventory::create_inventory_item
        ))
        .routes(routes!(inventory::get_inventory_item))
        .routes(routes!(inventory::update_item_quantity))
        .routes(routes!(inventory::get_item_transactions))
        .routes(routes!(inventory::get_reserves, inventory::create_reserve))
        .routes(routes!(inventory::update_reserve_status))
        .routes(routes!(inventory::get_transactions))
        // Notifications
        .routes(routes!(notification::get_notifications))
        .routes(routes!(notification::mark_notification_read))
        .routes(routes!(notification::mark_all_notifications_read))
        .routes(routes!(notification::delete_read_notifications))
        // Statistics
        .routes(routes!(statistics::get_overall))
        .routes(routes!(statistics::get_stock_movement_statistics))
        .routes(routes!(statistics::get_request_status_distribution))
        .routes(routes!(statistics::get_most_used_materials))
        .routes(routes!(statistics::get_project_material_usage))
        .routes(routes!(statistics::get_delivery_performance))
        .routes(routes!(statistics::get_stock_level_analysis))
        .merge(files)
        .merge(batch_files);

    (auth, api)
}

/// Splits out the OpenAPI document, mounts Swagger UI and applies the shared layers.
fn finish(state: AppState, routes: OpenApiRouter<AppState>, cors: CorsLayer) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", openapi))
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), response_cache))
        .with_state(state)
        .layer(security_header("x-content-type-options", "nosniff"))
        .layer(security_header("x-frame-options", "DENY"))
        .layer(security_header("x-xss-protection", "1; mode=block"))
        .layer(security_header(
            "strict-transport-security",
            "max-age=31536000; includeSubDomains",
        ))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

fn security_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, AppError> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
        name: "CORS_ORIGIN".to_string(),
        value: origin.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorDto::new("Route not found")))
}
