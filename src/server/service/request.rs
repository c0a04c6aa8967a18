//! Material requests raised against projects.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{material::MaterialRepository, project::ProjectRepository, request::RequestRepository},
    error::AppError,
    model::{
        notification::NotificationContent,
        pagination::{Paginated, Pagination},
        request::{CreateRequestParams, Request, RequestFilter, UpdateRequestParams},
    },
    service::notification::NotificationService,
    util::validation::Validator,
};
use entity::enums::{NotificationCategory, NotificationKind, RequestStatus};

pub struct RequestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequestService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &RequestFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Request>, AppError> {
        let (requests, total) = RequestRepository::new(self.db)
            .get_paginated(filter, pagination)
            .await?;

        Ok(Paginated::new(requests, total, pagination))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Request, AppError> {
        RequestRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))
    }

    /// Raises a pending request for the caller.
    ///
    /// # Returns
    /// - `Ok(Request)` - The created request
    /// - `Err(AppError::Validation)` - Quantity is not above zero
    /// - `Err(AppError::NotFound)` - Project or material does not exist
    pub async fn create(&self, params: CreateRequestParams) -> Result<Request, AppError> {
        Validator::new()
            .positive(params.requested_qty, "requested_qty")
            .finish()?;

        if !ProjectRepository::new(self.db)
            .exists(params.project_id)
            .await?
        {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        if MaterialRepository::new(self.db)
            .find_by_id(params.material_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Material not found".to_string()));
        }

        let request = RequestRepository::new(self.db).create(params).await?;

        tracing::info!(
            "User {} requested {} of material {} for project {}",
            request.requested_by,
            request.requested_qty,
            request.material_id,
            request.project_id
        );

        Ok(request)
    }

    /// Edits a pending request. A revised quantity may not exceed the material's stock.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Request is not pending
    /// - `Err(AppError::Conflict)` - Request left `pending` while the edit was checked
    pub async fn update(&self, id: i32, params: UpdateRequestParams) -> Result<Request, AppError> {
        let request = self.get_by_id(id).await?;
        if request.status != RequestStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending requests can be edited".to_string(),
            ));
        }

        if let Some(revised_qty) = params.revised_qty {
            Validator::new()
                .positive(revised_qty, "revised_qty")
                .finish()?;

            let material = MaterialRepository::new(self.db)
                .find_by_id(request.material_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;
            if revised_qty > material.stock_qty {
                return Err(AppError::invalid_field(
                    "revised_qty",
                    "revised_qty cannot exceed the available stock",
                ));
            }
        }

        if RequestRepository::new(self.db)
            .update_if_pending(id, params)
            .await?
            == 0
        {
            return Err(AppError::Conflict(
                "Request is no longer pending".to_string(),
            ));
        }

        self.get_by_id(id).await
    }

    /// Approves or rejects a pending request and notifies the requester.
    ///
    /// `delivered` is only reachable by completing a delivery. The transition is guarded on
    /// the `pending` status, so of two concurrent decisions only one is applied and
    /// notified; the other gets 409.
    pub async fn update_status(&self, id: i32, status: RequestStatus) -> Result<Request, AppError> {
        if !matches!(status, RequestStatus::Approved | RequestStatus::Rejected) {
            return Err(AppError::BadRequest(
                "Requests can only be approved or rejected here".to_string(),
            ));
        }

        let request = self.get_by_id(id).await?;
        if request.status != RequestStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending requests can be approved or rejected".to_string(),
            ));
        }

        if RequestRepository::new(self.db)
            .transition_status(id, RequestStatus::Pending, status)
            .await?
            == 0
        {
            return Err(AppError::Conflict(
                "Request is no longer pending".to_string(),
            ));
        }
        let request = self.get_by_id(id).await?;

        tracing::info!("Request {} marked {:?}", request.id, request.status);

        let (kind, verb) = match status {
            RequestStatus::Approved => (NotificationKind::Success, "approved"),
            _ => (NotificationKind::Warning, "rejected"),
        };
        let content = NotificationContent {
            title: format!("Request {}", verb),
            message: format!("Your material request #{} was {}", request.id, verb),
            kind,
            category: NotificationCategory::RequestStatus,
            reference_type: Some("request".to_string()),
            reference_id: Some(request.id),
        };
        if let Err(err) = NotificationService::new(self.db)
            .notify(request.requested_by, content)
            .await
        {
            tracing::error!("Failed to notify requester of request {}: {}", request.id, err);
        }

        Ok(request)
    }
}
