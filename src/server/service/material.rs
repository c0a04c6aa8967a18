//! Material catalogue, attributes and manual stock adjustments.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        material::{MaterialAttributeRepository, MaterialRepository},
        request::RequestRepository,
        stock_movement::StockMovementRepository,
        uom::UomRepository,
    },
    error::AppError,
    model::{
        material::{
            CreateAttributeParams, CreateMaterialParams, Material, MaterialAttribute,
            MaterialDetail, MaterialFilter, UpdateMaterialParams,
        },
        pagination::{Paginated, Pagination},
        stock_movement::RecordMovementParams,
    },
    service::notification::NotificationService,
    util::validation::Validator,
};
use entity::enums::StockReference;

pub const MIN_CODE_LEN: usize = 3;
pub const MIN_NAME_LEN: usize = 3;

pub struct MaterialService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaterialService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &MaterialFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Material>, AppError> {
        let (materials, total) = MaterialRepository::new(self.db)
            .get_paginated(filter, pagination)
            .await?;

        Ok(Paginated::new(materials, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Material, AppError> {
        MaterialRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))
    }

    /// Returns a material together with its attributes.
    pub async fn get_detail(&self, id: i32) -> Result<MaterialDetail, AppError> {
        let material = self.get_by_id(id).await?;
        let attributes = MaterialAttributeRepository::new(self.db)
            .get_by_material(id)
            .await?;

        Ok(MaterialDetail {
            material,
            attributes,
        })
    }

    /// Creates a material.
    ///
    /// # Returns
    /// - `Ok(Material)` - The created material
    /// - `Err(AppError::Validation)` - Short code or name, negative stock, unknown unit
    /// - `Err(AppError::BadRequest)` - Code already used, including by deleted materials
    pub async fn create(&self, mut params: CreateMaterialParams) -> Result<Material, AppError> {
        params.code = params.code.trim().to_string();
        params.name = params.name.trim().to_string();

        Validator::new()
            .min_len(&params.code, MIN_CODE_LEN, "code")
            .min_len(&params.name, MIN_NAME_LEN, "name")
            .non_negative(params.stock_qty, "stock_qty")
            .non_negative(params.min_stock_qty, "min_stock_qty")
            .finish()?;
        self.ensure_uom(params.uom_id).await?;

        let repo = MaterialRepository::new(self.db);
        if repo.code_taken(&params.code, None).await? {
            return Err(AppError::BadRequest(
                "Material code already exists".to_string(),
            ));
        }

        Ok(repo.create(params).await?)
    }

    /// Updates a material that has no pending or approved requests.
    pub async fn update(
        &self,
        id: i32,
        mut params: UpdateMaterialParams,
    ) -> Result<Material, AppError> {
        params.code = params.code.map(|c| c.trim().to_string());
        params.name = params.name.map(|n| n.trim().to_string());

        let mut validator = Validator::new();
        if let Some(code) = &params.code {
            validator.min_len(code, MIN_CODE_LEN, "code");
        }
        if let Some(name) = &params.name {
            validator.min_len(name, MIN_NAME_LEN, "name");
        }
        if let Some(min_stock_qty) = params.min_stock_qty {
            validator.non_negative(min_stock_qty, "min_stock_qty");
        }
        validator.finish()?;

        let repo = MaterialRepository::new(self.db);
        self.get_by_id(id).await?;

        if RequestRepository::new(self.db)
            .count_open_for_material(id)
            .await?
            > 0
        {
            return Err(AppError::BadRequest(
                "Material has active requests and cannot be modified".to_string(),
            ));
        }
        if let Some(uom_id) = params.uom_id {
            self.ensure_uom(uom_id).await?;
        }
        if let Some(code) = &params.code {
            if repo.code_taken(code, Some(id)).await? {
                return Err(AppError::BadRequest(
                    "Material code already exists".to_string(),
                ));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))
    }

    /// Soft deletes a material no request refers to.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get_by_id(id).await?;

        if RequestRepository::new(self.db)
            .count_for_material(id)
            .await?
            > 0
        {
            return Err(AppError::BadRequest(
                "Material is referenced by requests and cannot be deleted".to_string(),
            ));
        }

        MaterialRepository::new(self.db).soft_delete(id).await?;

        Ok(())
    }

    /// Sets a material's stock and records the adjustment as a stock movement.
    ///
    /// Setting the current value again is a no-op and records nothing. When the new
    /// stock is at or below the minimum, admins and warehouse users are alerted after
    /// the change is committed.
    ///
    /// # Returns
    /// - `Ok(Material)` - The material with its new stock
    /// - `Err(AppError::NotFound)` - Material does not exist
    /// - `Err(AppError::Validation)` - Negative or non-finite stock
    /// - `Err(AppError::Conflict)` - Stock changed between read and write
    pub async fn update_stock(
        &self,
        user_id: i32,
        id: i32,
        new_stock: f64,
        notes: Option<String>,
    ) -> Result<Material, AppError> {
        Validator::new()
            .non_negative(new_stock, "stock_qty")
            .finish()?;

        let txn = self.db.begin().await?;
        let repo = MaterialRepository::new(&txn);

        let material = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

        if material.stock_qty == new_stock {
            txn.commit().await?;
            return Ok(material);
        }

        let updated = repo
            .set_stock_if_unchanged(id, material.stock_qty, new_stock)
            .await?;
        if updated == 0 {
            return Err(AppError::Conflict(
                "Material stock was modified concurrently".to_string(),
            ));
        }

        StockMovementRepository::new(&txn)
            .record(RecordMovementParams {
                material_id: id,
                user_id,
                previous_stock: material.stock_qty,
                new_stock,
                reference_type: StockReference::Adjustment,
                reference_id: None,
                notes,
            })
            .await?;

        let material = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "User {} set stock of material {} to {}",
            user_id,
            material.code,
            new_stock
        );

        if material.is_low_stock() {
            if let Err(err) = NotificationService::new(self.db)
                .notify_stock_level(&material)
                .await
            {
                tracing::error!("Failed to send low stock alert: {}", err);
            }
        }

        Ok(material)
    }

    pub async fn get_attributes(&self, material_id: i32) -> Result<Vec<MaterialAttribute>, AppError> {
        self.get_by_id(material_id).await?;

        Ok(MaterialAttributeRepository::new(self.db)
            .get_by_material(material_id)
            .await?)
    }

    pub async fn add_attribute(
        &self,
        params: CreateAttributeParams,
    ) -> Result<MaterialAttribute, AppError> {
        Validator::new()
            .not_blank(&params.name, "name")
            .not_blank(&params.value, "value")
            .finish()?;
        self.get_by_id(params.material_id).await?;

        Ok(MaterialAttributeRepository::new(self.db)
            .create(params)
            .await?)
    }

    pub async fn delete_attribute(
        &self,
        material_id: i32,
        attribute_id: i32,
    ) -> Result<(), AppError> {
        if !MaterialAttributeRepository::new(self.db)
            .delete(material_id, attribute_id)
            .await?
        {
            return Err(AppError::NotFound("Attribute not found".to_string()));
        }

        Ok(())
    }

    async fn ensure_uom(&self, uom_id: i32) -> Result<(), AppError> {
        if !UomRepository::new(self.db).exists(uom_id).await? {
            return Err(AppError::invalid_field(
                "uom_id",
                "uom_id must reference an existing unit of measure",
            ));
        }

        Ok(())
    }
}
