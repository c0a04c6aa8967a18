//! Material domain models, filters and parameters.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{
    model::material::{
        CreateMaterialDto, MaterialAttributeDto, MaterialDetailDto, MaterialDto,
        UpdateMaterialDto,
    },
    server::util::sort::Sort,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
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

impl Material {
    pub fn from_entity(entity: entity::material::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            description: entity.description,
            uom_id: entity.uom_id,
            stock_qty: entity.stock_qty,
            min_stock_qty: entity.min_stock_qty,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether stock has fallen to or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_qty <= self.min_stock_qty
    }

    pub fn into_dto(self) -> MaterialDto {
        MaterialDto {
            id: self.id,
            code: self.code,
            name: self.name,
            description: self.description,
            uom_id: self.uom_id,
            stock_qty: self.stock_qty,
            min_stock_qty: self.min_stock_qty,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Material loaded together with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDetail {
    pub material: Material,
    pub attributes: Vec<MaterialAttribute>,
}

impl MaterialDetail {
    pub fn into_dto(self) -> MaterialDetailDto {
        MaterialDetailDto {
            material: self.material.into_dto(),
            attributes: self
                .attributes
                .into_iter()
                .map(MaterialAttribute::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAttribute {
    pub id: i32,
    pub material_id: i32,
    pub name: String,
    pub value: String,
}

impl MaterialAttribute {
    pub fn from_entity(entity: entity::material_attribute::Model) -> Self {
        Self {
            id: entity.id,
            material_id: entity.material_id,
            name: entity.name,
            value: entity.value,
        }
    }

    pub fn into_dto(self) -> MaterialAttributeDto {
        MaterialAttributeDto {
            id: self.id,
            material_id: self.material_id,
            name: self.name,
            value: self.value,
        }
    }
}

/// Columns materials can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSortField {
    Code,
    Name,
    StockQty,
    CreatedAt,
}

impl FromStr for MaterialSortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "name" => Ok(Self::Name),
            "stock_qty" => Ok(Self::StockQty),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(()),
        }
    }
}

/// Filters for the material list.
#[derive(Debug, Clone)]
pub struct MaterialFilter {
    /// Matches code or name.
    pub search: Option<String>,
    pub uom_id: Option<i32>,
    pub min_stock: Option<f64>,
    pub max_stock: Option<f64>,
    /// Only materials whose stock is at or below their minimum.
    pub low_stock: bool,
    pub sort: Sort<MaterialSortField>,
}

impl Default for MaterialFilter {
    fn default() -> Self {
        Self {
            search: None,
            uom_id: None,
            min_stock: None,
            max_stock: None,
            low_stock: false,
            sort: Sort {
                field: MaterialSortField::CreatedAt,
                descending: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMaterialParams {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub uom_id: i32,
    pub stock_qty: f64,
    pub min_stock_qty: f64,
}

impl CreateMaterialParams {
    pub fn from_dto(dto: CreateMaterialDto) -> Self {
        Self {
            code: dto.code.trim().to_string(),
            name: dto.name.trim().to_string(),
            description: dto.description,
            uom_id: dto.uom_id,
            stock_qty: dto.stock_qty,
            min_stock_qty: dto.min_stock_qty,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMaterialParams {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub uom_id: Option<i32>,
    pub min_stock_qty: Option<f64>,
}

impl UpdateMaterialParams {
    pub fn from_dto(dto: UpdateMaterialDto) -> Self {
        Self {
            code: dto.code.map(|c| c.trim().to_string()),
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            uom_id: dto.uom_id,
            min_stock_qty: dto.min_stock_qty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAttributeParams {
    pub material_id: i32,
    pub name: String,
    pub value: String,
}
