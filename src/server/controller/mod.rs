//! HTTP request handlers.
//!
//! Controllers authenticate the caller through `AuthGuard`, convert request DTOs into
//! domain parameters, call the matching service and wrap the result in the response
//! envelopes from `crate::model::api`. Each handler carries a `#[utoipa::path]`
//! annotation so the router can collect it into the OpenAPI document.

pub mod auth;
pub mod delivery;
pub mod employee;
pub mod file;
pub mod health;
pub mod institution;
pub mod inventory;
pub mod material;
pub mod notification;
pub mod project;
pub mod request;
pub mod role;
pub mod statistics;
pub mod stock_movement;
pub mod uom;
pub mod user;
pub mod warehouse;

use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::api::{DataDto, MessageDto, StatusMessageDto},
    server::model::pagination::Pagination,
};

/// Page selection shared by list endpoints without further filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Items per page (default 20, max 100)
    pub per_page: Option<u64>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// Wraps a single resource in the `{data}` envelope.
pub fn data<T>(data: T) -> Json<DataDto<T>> {
    Json(DataDto { data })
}

/// Wraps a resource in the `{message, data}` envelope.
pub fn message<T>(message: &str, data: T) -> Json<MessageDto<T>> {
    Json(MessageDto {
        message: message.to_string(),
        data,
    })
}

/// Body for mutations that only report a message.
pub fn status_message(message: &str) -> Json<StatusMessageDto> {
    Json(StatusMessageDto {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod test;
