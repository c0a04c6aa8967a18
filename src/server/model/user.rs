//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::{CreateUserDto, UpdateUserDto, UserDto};
use entity::enums::UserRole;

/// Application account without its password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// The password hash is dropped.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            full_name: entity.full_name,
            role: entity.role,
            phone: entity.phone,
            is_active: entity.is_active,
            last_login: entity.last_login,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            role: self.role,
            phone: self.phone,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Parameters for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Plain-text input for creating a user, validated and hashed by the service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl NewUser {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            full_name: dto.full_name,
            role: dto.role,
            phone: dto.phone,
            is_active: dto.is_active,
        }
    }
}

/// Partial user update. `password` is plain text and re-hashed by the service.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            full_name: dto.full_name,
            role: dto.role,
            phone: dto.phone,
            is_active: dto.is_active,
        }
    }
}
