use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto, MessageDto, PaginatedDto, StatusMessageDto},
        material::{
            CreateMaterialAttributeDto, CreateMaterialDto, MaterialAttributeDto,
            MaterialDetailDto, MaterialDto, UpdateMaterialDto, UpdateStockDto,
        },
    },
    server::{
        controller::{data, message, status_message},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            material::{
                CreateAttributeParams, CreateMaterialParams, MaterialFilter,
                UpdateMaterialParams,
            },
            pagination::Pagination,
        },
        service::material::MaterialService,
        state::AppState,
        util::sort::Sort,
    },
};

/// Tag for grouping material endpoints in OpenAPI documentation
pub static MATERIAL_TAG: &str = "material";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialQuery {
    /// Matches code or name
    pub search: Option<String>,
    pub uom_id: Option<i32>,
    pub min_stock: Option<f64>,
    pub max_stock: Option<f64>,
    /// Only materials at or below their minimum stock
    pub low_stock: Option<bool>,
    /// `field:dir` with field one of code, name, stock_qty, created_at
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl MaterialQuery {
    fn filter(self) -> Result<MaterialFilter, AppError> {
        let default = MaterialFilter::default();

        Ok(MaterialFilter {
            sort: Sort::parse_or(self.sort.as_deref(), default.sort)?,
            search: self.search.filter(|s| !s.trim().is_empty()),
            uom_id: self.uom_id,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            low_stock: self.low_stock.unwrap_or(false),
        })
    }
}

/// List materials.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Page of materials matching the filters
/// - `400 Bad Request` - Unknown sort field or direction
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/materials",
    tag = MATERIAL_TAG,
    params(MaterialQuery),
    responses(
        (status = 200, description = "Page of materials", body = PaginatedDto<MaterialDto>),
        (status = 400, description = "Invalid sort", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_materials(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<MaterialQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let pagination = Pagination::new(query.page, query.per_page);
    let filter = query.filter()?;

    let page = MaterialService::new(&state.db)
        .get_paginated(&filter, pagination)
        .await?;

    Ok(Json(page.into_dto(|m| m.into_dto())))
}

/// Get a material with its attributes.
#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material", body = DataDto<MaterialDetailDto>),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_material(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let detail = MaterialService::new(&state.db).get_detail(id).await?;

    Ok(data(detail.into_dto()))
}

/// Create a material.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new material
/// - `400 Bad Request` - Validation failure, unknown unit or duplicate code
#[utoipa::path(
    post,
    path = "/api/materials",
    tag = MATERIAL_TAG,
    request_body = CreateMaterialDto,
    responses(
        (status = 201, description = "Material created", body = MessageDto<MaterialDto>),
        (status = 400, description = "Invalid material data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_material(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateMaterialDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let material = MaterialService::new(&state.db)
        .create(CreateMaterialParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Material created successfully", material.into_dto()),
    ))
}

/// Update a material. Rejected while the material has pending or approved requests.
#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    request_body = UpdateMaterialDto,
    responses(
        (status = 200, description = "Material updated", body = MessageDto<MaterialDto>),
        (status = 400, description = "Invalid data or material has active requests", body = ErrorDto),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_material(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMaterialDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let material = MaterialService::new(&state.db)
        .update(id, UpdateMaterialParams::from_dto(payload))
        .await?;

    Ok(message("Material updated successfully", material.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material deleted", body = StatusMessageDto),
        (status = 400, description = "Material is referenced by requests", body = ErrorDto),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_material(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    MaterialService::new(&state.db).delete(id).await?;

    Ok(status_message("Material deleted successfully"))
}

/// Set a material's stock level.
///
/// Records an adjustment stock movement and alerts admins and warehouse users when the
/// new level is at or below the minimum.
///
/// # Access Control
/// - `Admin`, `Warehouse`
///
/// # Returns
/// - `200 OK` - Material with its new stock
/// - `400 Bad Request` - Negative stock
/// - `404 Not Found` - Material does not exist
/// - `409 Conflict` - Stock changed concurrently
#[utoipa::path(
    patch,
    path = "/api/materials/{id}/stock",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    request_body = UpdateStockDto,
    responses(
        (status = 200, description = "Stock updated", body = MessageDto<MaterialDto>),
        (status = 400, description = "Invalid stock", body = ErrorDto),
        (status = 404, description = "Material not found", body = ErrorDto),
        (status = 409, description = "Stock modified concurrently", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update_stock(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::ManageStock])
        .await?;

    let material = MaterialService::new(&state.db)
        .update_stock(user.id, id, payload.stock_qty, payload.notes)
        .await?;

    Ok(message("Stock updated successfully", material.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/materials/{id}/attributes",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material attributes", body = DataDto<Vec<MaterialAttributeDto>>),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_attributes(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let attributes = MaterialService::new(&state.db).get_attributes(id).await?;

    Ok(data(
        attributes
            .into_iter()
            .map(|a| a.into_dto())
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/materials/{id}/attributes",
    tag = MATERIAL_TAG,
    params(("id" = i32, Path, description = "Material ID")),
    request_body = CreateMaterialAttributeDto,
    responses(
        (status = 201, description = "Attribute added", body = MessageDto<MaterialAttributeDto>),
        (status = 400, description = "Invalid attribute", body = ErrorDto),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn add_attribute(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<CreateMaterialAttributeDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let attribute = MaterialService::new(&state.db)
        .add_attribute(CreateAttributeParams {
            material_id: id,
            name: payload.name,
            value: payload.value,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        message("Attribute added successfully", attribute.into_dto()),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/materials/{id}/attributes/{attribute_id}",
    tag = MATERIAL_TAG,
    params(
        ("id" = i32, Path, description = "Material ID"),
        ("attribute_id" = i32, Path, description = "Attribute ID")
    ),
    responses(
        (status = 200, description = "Attribute deleted", body = StatusMessageDto),
        (status = 404, description = "Attribute not found", body = ErrorDto)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_attribute(
    State(state): State<AppState>,
    token: BearerToken,
    Path((id, attribute_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    MaterialService::new(&state.db)
        .delete_attribute(id, attribute_id)
        .await?;

    Ok(status_message("Attribute deleted successfully"))
}
