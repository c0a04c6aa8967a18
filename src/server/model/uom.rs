use chrono::{DateTime, Utc};

use crate::model::uom::UomDto;

#[derive(Debug, Clone, PartialEq)]
pub struct Uom {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
}

impl Uom {
    pub fn from_entity(entity: entity::uom::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            symbol: entity.symbol,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UomDto {
        UomDto {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            created_at: self.created_at,
        }
    }
}
