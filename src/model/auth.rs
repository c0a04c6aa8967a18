use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;
use entity::enums::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub phone: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Engineer
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

/// Authenticated user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthSessionDto {
    pub user: UserDto,
    pub token: String,
}
