use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, BearerToken, Permission},
    util::jwt::JwtKeys,
};
use entity::enums::UserRole;
use test_utils::{builder::TestBuilder, factory};

mod bearer_token;
mod require;

fn keys() -> JwtKeys {
    JwtKeys::new("test-secret", 3600)
}
