//! Material factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating materials bound to an existing unit of measure.
///
/// # Example
///
/// ```rust,ignore
/// let material = MaterialFactory::new(&db, uom.id)
///     .code("CEM-001")
///     .stock_qty(50.0)
///     .min_stock_qty(10.0)
///     .build()
///     .await?;
/// ```
pub struct MaterialFactory<'a> {
    db: &'a DatabaseConnection,
    uom_id: i32,
    code: String,
    name: String,
    stock_qty: f64,
    min_stock_qty: f64,
}

impl<'a> MaterialFactory<'a> {
    /// Creates a new MaterialFactory with default values.
    ///
    /// Defaults:
    /// - code: `"MAT-{id}"`
    /// - name: `"Material {id}"`
    /// - stock_qty: `0.0`
    /// - min_stock_qty: `0.0`
    pub fn new(db: &'a DatabaseConnection, uom_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            uom_id,
            code: format!("MAT-{}", id),
            name: format!("Material {}", id),
            stock_qty: 0.0,
            min_stock_qty: 0.0,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn stock_qty(mut self, stock_qty: f64) -> Self {
        self.stock_qty = stock_qty;
        self
    }

    pub fn min_stock_qty(mut self, min_stock_qty: f64) -> Self {
        self.min_stock_qty = min_stock_qty;
        self
    }

    pub async fn build(self) -> Result<entity::material::Model, DbErr> {
        let now = Utc::now();
        entity::material::ActiveModel {
            code: ActiveValue::Set(self.code),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            uom_id: ActiveValue::Set(self.uom_id),
            stock_qty: ActiveValue::Set(self.stock_qty),
            min_stock_qty: ActiveValue::Set(self.min_stock_qty),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a material together with a fresh unit of measure.
pub async fn create_material(db: &DatabaseConnection) -> Result<entity::material::Model, DbErr> {
    let uom = crate::factory::uom::create_uom(db).await?;
    MaterialFactory::new(db, uom.id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_material_with_unit() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_material_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let material = create_material(db).await?;

        assert!(material.code.starts_with("MAT-"));
        assert_eq!(material.stock_qty, 0.0);
        assert!(material.deleted_at.is_none());

        Ok(())
    }
}
