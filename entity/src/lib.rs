//! SeaORM entity definitions for the depot database.
//!
//! One module per table. String-backed enumerations shared by several tables live in
//! [`enums`]. Tables with a `deleted_at` column are soft-deleted by the repositories.

pub mod prelude;

pub mod delivery;
pub mod employee;
pub mod enums;
pub mod file;
pub mod institution;
pub mod inventory;
pub mod inventory_item;
pub mod inventory_reserve;
pub mod inventory_transaction;
pub mod material;
pub mod material_attribute;
pub mod notification;
pub mod project;
pub mod project_employee;
pub mod project_user;
pub mod request;
pub mod role;
pub mod stock_movement;
pub mod uom;
pub mod user;
pub mod warehouse;
