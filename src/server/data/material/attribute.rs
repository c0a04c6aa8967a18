use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::material::{CreateAttributeParams, MaterialAttribute};

pub struct MaterialAttributeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaterialAttributeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateAttributeParams) -> Result<MaterialAttribute, DbErr> {
        let now = Utc::now();
        let entity = entity::material_attribute::ActiveModel {
            material_id: ActiveValue::Set(params.material_id),
            name: ActiveValue::Set(params.name),
            value: ActiveValue::Set(params.value),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(MaterialAttribute::from_entity(entity))
    }

    /// Gets the attributes of a material in insertion order.
    pub async fn get_by_material(&self, material_id: i32) -> Result<Vec<MaterialAttribute>, DbErr> {
        let entities = entity::prelude::MaterialAttribute::find()
            .filter(entity::material_attribute::Column::MaterialId.eq(material_id))
            .order_by_asc(entity::material_attribute::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(MaterialAttribute::from_entity)
            .collect())
    }

    /// Deletes an attribute, scoped to its material.
    ///
    /// # Returns
    /// - `Ok(true)` - Attribute deleted
    /// - `Ok(false)` - No such attribute on that material
    pub async fn delete(&self, material_id: i32, attribute_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::MaterialAttribute::delete_many()
            .filter(entity::material_attribute::Column::Id.eq(attribute_id))
            .filter(entity::material_attribute::Column::MaterialId.eq(material_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
