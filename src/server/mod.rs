//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: API endpoints, business logic, data access
//! and infrastructure services. The backend uses Axum as the web framework and SeaORM
//! for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, transactions and notifications
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer auth guard, response cache and rate limiting
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, JWT keys, cache, upload root)
//! - **Startup** (`startup`) - Database connection, migrations and system role seeding
//! - **Router** (`router`) - Route table, OpenAPI document and layer stack
//! - **Scheduler** (`scheduler/`) - Cron jobs for cache purge, low-stock sweep and cleanup
//! - **Util** (`util/`) - JWT, password hashing, sorting and input validation helpers
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** serves cached `GET` responses and evicts them after mutations
//! 3. **Controller** authenticates the caller, converts DTOs to params, calls the service
//! 4. **Service** applies business rules and orchestrates data operations
//! 5. **Data** queries the database and converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
