use chrono::{DateTime, Utc};

use crate::model::role::{CreateRoleDto, RoleDto, UpdateRoleDto};
use entity::enums::RoleKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub kind: RoleKind,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            kind: entity.kind,
            is_system: entity.is_system,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            kind: self.kind,
            is_system: self.is_system,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRoleParams {
    pub name: String,
    pub kind: RoleKind,
    pub is_system: bool,
}

impl CreateRoleParams {
    /// Roles created through the API are never system roles.
    pub fn from_dto(dto: CreateRoleDto) -> Self {
        Self {
            name: dto.name,
            kind: dto.kind,
            is_system: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub kind: Option<RoleKind>,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Self {
        Self {
            name: dto.name,
            kind: dto.kind,
        }
    }
}
