use super::*;

/// Tests the public health endpoint and the security headers on every response.
///
/// Expected: 200 `{"status":"ok"}` with nosniff and frame headers
#[tokio::test]
async fn health_is_public() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let (_, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

/// Tests an unknown path.
///
/// Expected: 404 with the JSON error body
#[tokio::test]
async fn unknown_route_is_json_404() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (status, body) = send(&app, Method::GET, "/api/nothing-here", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

/// Tests that protected routes reject missing and malformed tokens.
///
/// Expected: 401 with the matching error message
#[tokio::test]
async fn protected_routes_require_token() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (status, body) = send(&app, Method::GET, "/api/materials", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");

    let (status, body) = send(&app, Method::GET, "/api/materials", Some("   "), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token format");

    let (status, body) =
        send(&app, Method::GET, "/api/materials", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

/// Tests role checks on admin and reporting endpoints.
///
/// Expected: 403 for a contractor, 200 for an engineer on the reports endpoint
#[tokio::test]
async fn enforces_roles() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let contractor = token_for(db, UserRole::Contractor).await;
    let engineer = token_for(db, UserRole::Engineer).await;

    let (status, body) = send(&app, Method::GET, "/api/users", Some(&contractor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/statistics/request-status-distribution",
        Some(&contractor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/statistics/request-status-distribution",
        Some(&engineer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Tests that the OpenAPI document is served.
///
/// Expected: 200 with the bearer scheme registered
#[tokio::test]
async fn serves_openapi_document() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/materials"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
