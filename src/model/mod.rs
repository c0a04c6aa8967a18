//! Data transfer objects exchanged over the HTTP API.
//!
//! Every type here derives `Serialize`/`Deserialize` for the wire and `utoipa::ToSchema`
//! so it shows up in the generated OpenAPI document. Server-side domain models convert
//! into these at the controller boundary.

pub mod api;
pub mod auth;
pub mod delivery;
pub mod employee;
pub mod file;
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
