//! Business logic layer.
//!
//! Services sit between the controllers and the repositories. They validate input,
//! enforce the workflow rules of each resource, open transactions where several writes
//! must commit together and send notifications once a change is committed. Every
//! service borrows the database connection and is created per request.

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

#[cfg(test)]
mod test;
