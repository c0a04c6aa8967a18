use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};

use crate::error::TestError;

const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database of a single test.
///
/// The pool is limited to one connection: every connection to `sqlite::memory:` opens a
/// separate database, so a larger pool would hide rows between queries.
pub struct TestContext {
    /// Connection to the in-memory database, `None` until `database()` is called.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Returns the connection, opening the database on first use.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            let mut options = ConnectOptions::new(SQLITE_MEMORY_URL);
            options
                .max_connections(1)
                .min_connections(1)
                .sqlx_logging(false);

            self.db = Some(Database::connect(options).await?);
        }

        self.db
            .as_ref()
            .ok_or_else(|| TestError::Setup("database connection missing".to_string()))
    }

    /// Runs the CREATE TABLE statements in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;
        let backend = db.get_database_backend();

        for stmt in &stmts {
            db.execute(backend.build(stmt)).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
