//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults so tests only spell out the fields they
//! care about. Each entity has a `Factory` struct for customization and a `create_*`
//! shorthand for default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let material = factory::material::create_material(&db).await?;
//!
//!     // Create an inventory item together with its material, warehouse and unit
//!     let item = factory::helpers::create_inventory_item_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .username("alice")
//!     .role(UserRole::Admin)
//!     .build()
//!     .await?;
//! ```

pub mod employee;
pub mod helpers;
pub mod inventory_item;
pub mod material;
pub mod notification;
pub mod project;
pub mod request;
pub mod role;
pub mod uom;
pub mod user;
pub mod warehouse;

pub use employee::create_employee;
pub use inventory_item::create_inventory_item;
pub use material::create_material;
pub use notification::create_notification;
pub use project::create_project;
pub use request::create_request;
pub use role::create_role;
pub use uom::create_uom;
pub use user::create_user;
pub use warehouse::create_warehouse;
