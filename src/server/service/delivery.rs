//! Delivery completion, the transactional path that turns an approved request into
//! an outgoing stock movement.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        delivery::DeliveryRepository, material::MaterialRepository, request::RequestRepository,
        stock_movement::StockMovementRepository,
    },
    error::AppError,
    model::{
        delivery::{CompletedDelivery, Delivery},
        material::Material,
        notification::NotificationContent,
        pagination::{Paginated, Pagination},
        stock_movement::RecordMovementParams,
    },
    service::notification::NotificationService,
};
use entity::enums::{
    DeliveryStatus, NotificationCategory, NotificationKind, RequestStatus, StockReference,
};

pub struct DeliveryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DeliveryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        status: Option<DeliveryStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<Delivery>, AppError> {
        let (deliveries, total) = DeliveryRepository::new(self.db)
            .get_paginated(status, pagination)
            .await?;

        Ok(Paginated::new(deliveries, total, pagination))
    }

    /// Completes delivery of an approved request.
    ///
    /// Stock deduction, the outgoing stock movement, the delivery row and the request
    /// status change commit together or not at all. Notifications are sent after commit
    /// and never fail the call.
    ///
    /// # Arguments
    /// - `user_id` - User completing the delivery
    /// - `request_id` - Approved request being fulfilled
    /// - `received_by` - Optional user who received the goods
    ///
    /// # Returns
    /// - `Ok(CompletedDelivery)` - The delivery and the material's remaining stock
    /// - `Err(AppError::NotFound)` - Request or material does not exist
    /// - `Err(AppError::BadRequest)` - Request not approved, already delivered, or stock too low
    /// - `Err(AppError::Conflict)` - Material stock changed while completing
    pub async fn complete(
        &self,
        user_id: i32,
        request_id: i32,
        received_by: Option<i32>,
    ) -> Result<CompletedDelivery, AppError> {
        let txn = self.db.begin().await?;

        let requests = RequestRepository::new(&txn);
        let deliveries = DeliveryRepository::new(&txn);
        let materials = MaterialRepository::new(&txn);

        let request = requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        if request.status != RequestStatus::Approved {
            return Err(AppError::BadRequest(
                "Only approved requests can be delivered".to_string(),
            ));
        }
        if deliveries.exists_for_request(request_id).await? {
            return Err(AppError::BadRequest(
                "Request has already been delivered".to_string(),
            ));
        }

        let qty = request.effective_qty();
        let material = materials
            .find_by_id(request.material_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

        if material.stock_qty < qty {
            return Err(AppError::BadRequest("Insufficient stock".to_string()));
        }

        let new_stock = material.stock_qty - qty;
        if materials
            .set_stock_if_unchanged(material.id, material.stock_qty, new_stock)
            .await?
            == 0
        {
            return Err(AppError::Conflict(
                "Material stock was modified concurrently".to_string(),
            ));
        }

        StockMovementRepository::new(&txn)
            .record(RecordMovementParams {
                material_id: material.id,
                user_id,
                previous_stock: material.stock_qty,
                new_stock,
                reference_type: StockReference::Delivery,
                reference_id: Some(request.id),
                notes: Some(format!("Delivery for request #{}", request.id)),
            })
            .await?;

        let delivery = deliveries
            .create_completed(request.id, user_id, received_by, Utc::now())
            .await?;

        if requests
            .transition_status(request.id, RequestStatus::Approved, RequestStatus::Delivered)
            .await?
            == 0
        {
            return Err(AppError::Conflict(
                "Request status was modified concurrently".to_string(),
            ));
        }

        txn.commit().await?;

        tracing::info!(
            "Delivered request {}: {} of material {} ({} left)",
            request.id,
            qty,
            material.code,
            new_stock
        );

        let completed = CompletedDelivery {
            delivery,
            material_id: material.id,
            material_name: material.name.clone(),
            requested_by: request.requested_by,
            new_stock,
            min_stock_qty: material.min_stock_qty,
        };

        self.notify_completion(
            &completed,
            Material {
                stock_qty: new_stock,
                ..material
            },
        )
        .await;

        Ok(completed)
    }

    /// Sets a delivery's status. Completing stamps the delivery date.
    pub async fn update_status(&self, id: i32, status: DeliveryStatus) -> Result<Delivery, AppError> {
        DeliveryRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Delivery not found".to_string()))
    }

    async fn notify_completion(&self, completed: &CompletedDelivery, material: Material) {
        let notifications = NotificationService::new(self.db);

        let content = NotificationContent {
            title: "Request delivered".to_string(),
            message: format!(
                "Your request #{} for {} has been delivered",
                completed.delivery.request_id, completed.material_name
            ),
            kind: NotificationKind::Success,
            category: NotificationCategory::DeliveryStatus,
            reference_type: Some("delivery".to_string()),
            reference_id: Some(completed.delivery.id),
        };
        if let Err(err) = notifications.notify(completed.requested_by, content).await {
            tracing::error!(
                "Failed to notify requester of delivery {}: {}",
                completed.delivery.id,
                err
            );
        }

        if material.is_low_stock() {
            if let Err(err) = notifications.notify_stock_level(&material).await {
                tracing::error!("Failed to send low stock alert: {}", err);
            }
        }
    }
}
