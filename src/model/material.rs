use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialDto {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub uom_id: i32,
    pub stock_qty: f64,
    pub min_stock_qty: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Material together with its attributes, returned by the single-material endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialDetailDto {
    #[serde(flatten)]
    pub material: MaterialDto,
    pub attributes: Vec<MaterialAttributeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMaterialDto {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub uom_id: i32,
    #[serde(default)]
    pub stock_qty: f64,
    #[serde(default)]
    pub min_stock_qty: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMaterialDto {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub uom_id: Option<i32>,
    pub min_stock_qty: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStockDto {
    pub stock_qty: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialAttributeDto {
    pub id: i32,
    pub material_id: i32,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMaterialAttributeDto {
    pub name: String,
    pub value: String,
}
