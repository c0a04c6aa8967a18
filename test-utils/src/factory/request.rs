//! Material request factory.

use chrono::Utc;
use entity::enums::RequestStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct RequestFactory<'a> {
    db: &'a DatabaseConnection,
    requested_by: i32,
    project_id: i32,
    material_id: i32,
    requested_qty: f64,
    revised_qty: Option<f64>,
    status: RequestStatus,
}

impl<'a> RequestFactory<'a> {
    /// Creates a factory for a pending request of `5.0` units.
    pub fn new(
        db: &'a DatabaseConnection,
        requested_by: i32,
        project_id: i32,
        material_id: i32,
    ) -> Self {
        Self {
            db,
            requested_by,
            project_id,
            material_id,
            requested_qty: 5.0,
            revised_qty: None,
            status: RequestStatus::Pending,
        }
    }

    pub fn requested_qty(mut self, requested_qty: f64) -> Self {
        self.requested_qty = requested_qty;
        self
    }

    pub fn revised_qty(mut self, revised_qty: Option<f64>) -> Self {
        self.revised_qty = revised_qty;
        self
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::request::Model, DbErr> {
        let now = Utc::now();
        entity::request::ActiveModel {
            requested_by: ActiveValue::Set(self.requested_by),
            material_id: ActiveValue::Set(self.material_id),
            project_id: ActiveValue::Set(self.project_id),
            requested_qty: ActiveValue::Set(self.requested_qty),
            revised_qty: ActiveValue::Set(self.revised_qty),
            status: ActiveValue::Set(self.status),
            request_note: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_request(
    db: &DatabaseConnection,
    requested_by: i32,
    project_id: i32,
    material_id: i32,
) -> Result<entity::request::Model, DbErr> {
    RequestFactory::new(db, requested_by, project_id, material_id)
        .build()
        .await
}
