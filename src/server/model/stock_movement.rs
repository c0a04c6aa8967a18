use chrono::{DateTime, Utc};

use crate::model::stock_movement::StockMovementDto;
use entity::enums::{MovementKind, StockReference};

#[derive(Debug, Clone, PartialEq)]
pub struct StockMovement {
    pub id: i32,
    pub material_id: i32,
    pub user_id: i32,
    pub kind: MovementKind,
    pub quantity: f64,
    pub previous_stock: f64,
    pub new_stock: f64,
    pub reference_type: StockReference,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn from_entity(entity: entity::stock_movement::Model) -> Self {
        Self {
            id: entity.id,
            material_id: entity.material_id,
            user_id: entity.user_id,
            kind: entity.kind,
            quantity: entity.quantity,
            previous_stock: entity.previous_stock,
            new_stock: entity.new_stock,
            reference_type: entity.reference_type,
            reference_id: entity.reference_id,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> StockMovementDto {
        StockMovementDto {
            id: self.id,
            material_id: self.material_id,
            user_id: self.user_id,
            kind: self.kind,
            quantity: self.quantity,
            previous_stock: self.previous_stock,
            new_stock: self.new_stock,
            reference_type: self.reference_type,
            reference_id: self.reference_id,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

/// Parameters for recording a stock change. The kind and quantity are derived
/// from the two stock values.
#[derive(Debug, Clone)]
pub struct RecordMovementParams {
    pub material_id: i32,
    pub user_id: i32,
    pub previous_stock: f64,
    pub new_stock: f64,
    pub reference_type: StockReference,
    pub reference_id: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StockMovementFilter {
    pub material_id: Option<i32>,
    pub kind: Option<MovementKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
