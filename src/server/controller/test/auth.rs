use super::*;

/// Tests the register, login and profile flow over HTTP.
///
/// Expected: 201 on register, 200 on login, and the token opens the profile
#[tokio::test]
async fn registers_logs_in_and_reads_profile() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "siteeng",
            "email": "siteeng@example.com",
            "password": "secret12",
            "full_name": "Site Engineer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "engineer");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "siteeng", "password": "secret12" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "siteeng");
}

/// Tests login with a wrong password.
///
/// Expected: 401 Invalid credentials
#[tokio::test]
async fn rejects_wrong_password() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = app(db, dir.path());

    send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "keeper",
            "email": "keeper@example.com",
            "password": "secret12",
            "full_name": "Store Keeper"
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "keeper", "password": "not-it" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}
