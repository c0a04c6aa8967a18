//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request through
//! Axum's state extraction. It holds:
//! - the database connection pool
//! - the JWT signing and verification keys
//! - the response cache, shared with the maintenance scheduler
//! - the root directory for uploaded files

use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::server::{middleware::cache::ResponseCache, util::jwt::JwtKeys};

/// Application state containing shared resources and dependencies.
///
/// Every field is cheap to clone: `DatabaseConnection` is a pool handle, `JwtKeys` holds
/// small key buffers and `ResponseCache` is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Keys used to issue and verify bearer tokens.
    pub jwt: JwtKeys,

    /// Cache of successful `GET` responses.
    pub cache: ResponseCache,

    /// Directory uploads are written under, one sub-directory per file category.
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `jwt` - Token keys derived from the configured secret
    /// - `cache` - Response cache
    /// - `upload_dir` - Root directory for stored uploads
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtKeys,
        cache: ResponseCache,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            jwt,
            cache,
            upload_dir,
        }
    }
}
