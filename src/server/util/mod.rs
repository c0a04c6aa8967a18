//! Small helpers shared by services and middleware.

pub mod jwt;
pub mod password;
pub mod sort;
pub mod validation;
