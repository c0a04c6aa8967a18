//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod delivery;
pub mod employee;
pub mod file;
pub mod institution;
pub mod inventory;
pub mod material;
pub mod notification;
pub mod pagination;
pub mod project;
pub mod request;
pub mod role;
pub mod statistics;
pub mod stock_movement;
pub mod uom;
pub mod user;
pub mod warehouse;
