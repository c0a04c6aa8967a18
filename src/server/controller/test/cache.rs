use super::*;

async fn user_with_token(db: &DatabaseConnection, role: UserRole) -> (i32, String) {
    let user = factory::user::create_user_with_role(db, role).await.unwrap();
    let token = JwtKeys::new(SECRET, 3600).issue(user.id, user.role).unwrap();
    (user.id, token)
}

async fn cache_status(app: &Router, uri: &str, token: &str) -> (StatusCode, Option<String>) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    let hit = response
        .headers()
        .get("x-cache")
        .map(|v| v.to_str().unwrap().to_string());
    (response.status(), hit)
}

/// Tests that a repeated list request is answered from the cache.
///
/// Expected: first GET misses, second carries `X-Cache: HIT`
#[tokio::test]
async fn repeats_are_served_from_cache() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (_, engineer) = user_with_token(db, UserRole::Engineer).await;

    let (status, hit) = cache_status(&app, "/api/materials", &engineer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hit, None);

    let (status, hit) = cache_status(&app, "/api/materials", &engineer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hit.as_deref(), Some("HIT"));
}

/// Tests a cached list requested again after the caller was deactivated.
///
/// Expected: 401 instead of the stored response
#[tokio::test]
async fn deactivated_user_is_not_served_from_cache() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let admin = token_for(db, UserRole::Admin).await;
    let (engineer_id, engineer) = user_with_token(db, UserRole::Engineer).await;

    let (status, _) = send(&app, Method::GET, "/api/materials", Some(&engineer), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", engineer_id),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, hit) = cache_status(&app, "/api/materials", &engineer).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(hit, None);
}

/// Tests a cached report requested again after the caller lost the role it needs.
///
/// Expected: 403 once the engineer is demoted to contractor
#[tokio::test]
async fn demoted_user_is_not_served_from_cache() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let uri = "/api/statistics/request-status-distribution";
    let admin = token_for(db, UserRole::Admin).await;
    let (engineer_id, engineer) = user_with_token(db, UserRole::Engineer).await;

    let (status, _) = send(&app, Method::GET, uri, Some(&engineer), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", engineer_id),
        Some(&admin),
        Some(json!({ "role": "contractor" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, uri, Some(&engineer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");
}

/// Tests a cached list requested with a token that has already expired.
///
/// Expected: 401 `Token expired`
#[tokio::test]
async fn expired_token_is_not_served_from_cache() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (engineer_id, engineer) = user_with_token(db, UserRole::Engineer).await;
    let (status, _) = send(&app, Method::GET, "/api/materials", Some(&engineer), None).await;
    assert_eq!(status, StatusCode::OK);

    let expired = JwtKeys::new(SECRET, -3600)
        .issue(engineer_id, UserRole::Engineer)
        .unwrap();
    let (status, body) = send(&app, Method::GET, "/api/materials", Some(&expired), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");
}
