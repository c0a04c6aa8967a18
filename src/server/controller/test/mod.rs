use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::server::{
    middleware::cache::ResponseCache, router::router, state::AppState, util::jwt::JwtKeys,
};
use entity::enums::UserRole;
use test_utils::{builder::TestBuilder, factory};

mod auth;
mod cache;
mod file;
mod material;
mod routing;

const SECRET: &str = "router-test-secret";

fn app(db: &DatabaseConnection, upload_dir: &std::path::Path) -> Router {
    router(AppState::new(
        db.clone(),
        JwtKeys::new(SECRET, 3600),
        ResponseCache::new(100, Duration::from_secs(60)),
        upload_dir.to_path_buf(),
    ))
}

/// Creates a user with `role` and returns a bearer token for it.
async fn token_for(db: &DatabaseConnection, role: UserRole) -> String {
    let user = factory::user::create_user_with_role(db, role).await.unwrap();
    JwtKeys::new(SECRET, 3600).issue(user.id, user.role).unwrap()
}

/// Sends one request through the router and returns the status and JSON body.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
