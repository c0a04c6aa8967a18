use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeDto {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmployeeDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i32>,
}
