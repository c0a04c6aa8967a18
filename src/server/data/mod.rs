//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Repositories whose
//! writes take part in multi-step workflows are generic over `ConnectionTrait` so they run
//! equally on a pooled connection or inside an open transaction.

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

#[cfg(test)]
mod test;
