//! Inventory item factory.

use chrono::Utc;
use entity::enums::ItemType;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct InventoryItemFactory<'a> {
    db: &'a DatabaseConnection,
    material_id: i32,
    warehouse_id: i32,
    uom_id: i32,
    item_type: ItemType,
    quantity: f64,
    reserved_quantity: f64,
}

impl<'a> InventoryItemFactory<'a> {
    /// Creates a factory for a `whole` item holding `10.0` units, none reserved.
    pub fn new(
        db: &'a DatabaseConnection,
        material_id: i32,
        warehouse_id: i32,
        uom_id: i32,
    ) -> Self {
        Self {
            db,
            material_id,
            warehouse_id,
            uom_id,
            item_type: ItemType::Whole,
            quantity: 10.0,
            reserved_quantity: 0.0,
        }
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn reserved_quantity(mut self, reserved_quantity: f64) -> Self {
        self.reserved_quantity = reserved_quantity;
        self
    }

    pub async fn build(self) -> Result<entity::inventory_item::Model, DbErr> {
        let now = Utc::now();
        entity::inventory_item::ActiveModel {
            material_id: ActiveValue::Set(self.material_id),
            warehouse_id: ActiveValue::Set(self.warehouse_id),
            uom_id: ActiveValue::Set(self.uom_id),
            institution_id: ActiveValue::Set(None),
            item_type: ActiveValue::Set(self.item_type),
            quantity: ActiveValue::Set(self.quantity),
            reserved_quantity: ActiveValue::Set(self.reserved_quantity),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an inventory item for existing material, warehouse and unit rows.
pub async fn create_inventory_item(
    db: &DatabaseConnection,
    material_id: i32,
    warehouse_id: i32,
    uom_id: i32,
) -> Result<entity::inventory_item::Model, DbErr> {
    InventoryItemFactory::new(db, material_id, warehouse_id, uom_id)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::helpers};

    #[tokio::test]
    async fn creates_item_with_dependencies() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_inventory_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let item = helpers::create_inventory_item_with_dependencies(db).await?;

        assert_eq!(item.quantity, 10.0);
        assert_eq!(item.reserved_quantity, 0.0);
        assert_eq!(item.item_type, ItemType::Whole);

        Ok(())
    }
}
