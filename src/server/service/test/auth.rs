use super::*;
use crate::server::{
    error::auth::AuthError, model::user::NewUser, service::auth::AuthService, util::jwt::JwtKeys,
};
use entity::enums::UserRole;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "hunter22".to_string(),
        full_name: "Test User".to_string(),
        role: UserRole::Engineer,
        phone: None,
        is_active: true,
    }
}

/// Tests registering and then logging in with the same credentials.
///
/// Expected: both tokens verify to the new user and login stamps last_login
#[tokio::test]
async fn registers_and_logs_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtKeys::new("test-secret", 3600);

    let service = AuthService::new(db, &jwt);
    let (user, token) = service.register(new_user("engineer1")).await?;
    assert_eq!(jwt.verify(&token)?.sub, user.id);
    assert!(user.last_login.is_none());

    let (logged_in, token) = service.login("engineer1", "hunter22").await?;
    assert_eq!(logged_in.id, user.id);
    assert_eq!(jwt.verify(&token)?.role, UserRole::Engineer);
    assert!(logged_in.last_login.is_some());

    Ok(())
}

/// Tests registering a username that already exists.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_duplicate_registration() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtKeys::new("test-secret", 3600);

    let service = AuthService::new(db, &jwt);
    service.register(new_user("keeper1")).await?;
    let result = service.register(new_user("keeper1")).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests login failures.
///
/// Expected: the same InvalidCredentials error for a wrong password, an unknown user
/// and a deactivated account
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtKeys::new("test-secret", 3600);

    let service = AuthService::new(db, &jwt);
    service.register(new_user("alice")).await?;
    service
        .register(NewUser {
            is_active: false,
            ..new_user("dormant")
        })
        .await?;

    for (username, password) in [("alice", "wrong-pass"), ("nobody", "hunter22"), ("dormant", "hunter22")] {
        let result = service.login(username, password).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}

/// Tests changing the password.
///
/// Expected: a wrong current password is refused; afterwards only the new one logs in
#[tokio::test]
async fn changes_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtKeys::new("test-secret", 3600);

    let service = AuthService::new(db, &jwt);
    let (user, _) = service.register(new_user("bob")).await?;

    let wrong = service.change_password(user.id, "nope", "newpass1").await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::IncorrectPassword))
    ));

    service.change_password(user.id, "hunter22", "newpass1").await?;
    assert!(service.login("bob", "hunter22").await.is_err());
    assert!(service.login("bob", "newpass1").await.is_ok());

    Ok(())
}
