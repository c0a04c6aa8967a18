//! Material request domain models, filters and parameters.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{
    model::request::{CreateRequestDto, RequestDto, UpdateRequestDto},
    server::util::sort::Sort,
};
use entity::enums::RequestStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: i32,
    pub requested_by: i32,
    pub material_id: i32,
    pub project_id: i32,
    pub requested_qty: f64,
    pub revised_qty: Option<f64>,
    pub status: RequestStatus,
    pub request_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn from_entity(entity: entity::request::Model) -> Self {
        Self {
            id: entity.id,
            requested_by: entity.requested_by,
            material_id: entity.material_id,
            project_id: entity.project_id,
            requested_qty: entity.requested_qty,
            revised_qty: entity.revised_qty,
            status: entity.status,
            request_note: entity.request_note,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Quantity a delivery hands out: the revised quantity when set, else the requested one.
    pub fn effective_qty(&self) -> f64 {
        self.revised_qty.unwrap_or(self.requested_qty)
    }

    pub fn into_dto(self) -> RequestDto {
        RequestDto {
            id: self.id,
            requested_by: self.requested_by,
            material_id: self.material_id,
            project_id: self.project_id,
            requested_qty: self.requested_qty,
            revised_qty: self.revised_qty,
            status: self.status,
            request_note: self.request_note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSortField {
    CreatedAt,
    RequestedQty,
    Status,
}

impl FromStr for RequestSortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "requested_qty" => Ok(Self::RequestedQty),
            "status" => Ok(Self::Status),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub project_id: Option<i32>,
    pub material_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub min_qty: Option<f64>,
    pub max_qty: Option<f64>,
    pub sort: Sort<RequestSortField>,
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self {
            status: None,
            project_id: None,
            material_id: None,
            start_date: None,
            end_date: None,
            min_qty: None,
            max_qty: None,
            sort: Sort {
                field: RequestSortField::CreatedAt,
                descending: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRequestParams {
    pub requested_by: i32,
    pub material_id: i32,
    pub project_id: i32,
    pub requested_qty: f64,
    pub request_note: Option<String>,
}

impl CreateRequestParams {
    pub fn from_dto(requested_by: i32, dto: CreateRequestDto) -> Self {
        Self {
            requested_by,
            material_id: dto.material_id,
            project_id: dto.project_id,
            requested_qty: dto.requested_qty,
            request_note: dto.request_note,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequestParams {
    pub revised_qty: Option<f64>,
    pub request_note: Option<String>,
}

impl UpdateRequestParams {
    pub fn from_dto(dto: UpdateRequestDto) -> Self {
        Self {
            revised_qty: dto.revised_qty,
            request_note: dto.request_note,
        }
    }
}
