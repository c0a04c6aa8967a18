//! Shared fixtures for the depot test suites.
//!
//! Tests run against a fresh in-memory SQLite database per test. The schema is generated
//! from the SeaORM entities rather than the migrations, so a test only creates the tables
//! it touches.
//!
//! - [`builder::TestBuilder`] picks tables one by one or through the grouped helpers
//!   (`with_user_tables`, `with_inventory_tables`, `with_request_tables`, ...)
//! - [`context::TestContext`] owns the connection for the lifetime of the test
//! - [`factory`] inserts rows with unique defaults, with builder types where a test needs
//!   to override fields
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn counts_open_requests() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_request_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (_user, _project, material, _request) =
//!         factory::helpers::create_request_with_dependencies(db).await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
