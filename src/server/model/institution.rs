use chrono::{DateTime, Utc};

use crate::model::institution::{CreateInstitutionDto, InstitutionDto, UpdateInstitutionDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Institution {
    pub fn from_entity(entity: entity::institution::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> InstitutionDto {
        InstitutionDto {
            id: self.id,
            name: self.name,
            code: self.code,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInstitutionParams {
    pub name: String,
    pub code: Option<String>,
}

impl CreateInstitutionParams {
    pub fn from_dto(dto: CreateInstitutionDto) -> Self {
        Self {
            name: dto.name,
            code: dto.code.filter(|c| !c.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateInstitutionParams {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl UpdateInstitutionParams {
    pub fn from_dto(dto: UpdateInstitutionDto) -> Self {
        Self {
            name: dto.name,
            code: dto.code,
        }
    }
}
