use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables, then call `build()` to create an in-memory SQLite database with
/// those tables. Every statement is emitted with `IF NOT EXISTS`, so the table groups
/// below can be combined freely.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Material, Uom};
///
/// let test = TestBuilder::new()
///     .with_table(Uom)
///     .with_table(Material)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys must be added after the tables they reference, since
    /// SQLite enforces foreign keys on the connection.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut stmt = schema.create_table_from_entity(entity);
        stmt.if_not_exists();
        self.tables.push(stmt);
        self
    }

    /// Adds the user account tables: User and Notification.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(Notification)
    }

    /// Adds the material catalogue tables.
    ///
    /// - User
    /// - Uom
    /// - Material
    /// - MaterialAttribute
    pub fn with_material_tables(self) -> Self {
        self.with_table(User)
            .with_table(Uom)
            .with_table(Material)
            .with_table(MaterialAttribute)
    }

    /// Adds every table needed by inventory operations.
    ///
    /// - User, Uom, Institution, Warehouse, Material, Project
    /// - Inventory, InventoryItem, InventoryTransaction, InventoryReserve
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_inventory_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_inventory_tables(self) -> Self {
        self.with_table(User)
            .with_table(Uom)
            .with_table(Institution)
            .with_table(Warehouse)
            .with_table(Material)
            .with_table(Project)
            .with_table(Inventory)
            .with_table(InventoryItem)
            .with_table(InventoryTransaction)
            .with_table(InventoryReserve)
    }

    /// Adds every table needed by the request and delivery workflow.
    ///
    /// - User, Notification, Uom, Material, Project
    /// - Request, Delivery, StockMovement
    pub fn with_request_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Uom)
            .with_table(Material)
            .with_table(Project)
            .with_table(Request)
            .with_table(Delivery)
            .with_table(StockMovement)
    }

    /// Adds the project membership tables, including roles and employees.
    pub fn with_project_tables(self) -> Self {
        self.with_table(User)
            .with_table(Role)
            .with_table(Employee)
            .with_table(Project)
            .with_table(ProjectUser)
            .with_table(ProjectEmployee)
    }

    /// Adds every table of the schema in dependency order.
    ///
    /// Used by router-level tests that exercise the whole application.
    pub fn with_all_tables(self) -> Self {
        self.with_project_tables()
            .with_request_tables()
            .with_inventory_tables()
            .with_table(MaterialAttribute)
            .with_table(File)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
