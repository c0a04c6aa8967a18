use chrono::{DateTime, Utc};

use crate::model::warehouse::{CreateWarehouseDto, UpdateWarehouseDto, WarehouseDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn from_entity(entity: entity::warehouse::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            location: entity.location,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> WarehouseDto {
        WarehouseDto {
            id: self.id,
            code: self.code,
            name: self.name,
            location: self.location,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateWarehouseParams {
    pub code: String,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
}

impl CreateWarehouseParams {
    pub fn from_dto(dto: CreateWarehouseDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name,
            location: dto.location,
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateWarehouseParams {
    pub code: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateWarehouseParams {
    pub fn from_dto(dto: UpdateWarehouseDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name,
            location: dto.location,
            is_active: dto.is_active,
        }
    }
}
