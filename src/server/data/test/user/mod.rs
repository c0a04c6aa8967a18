use crate::server::{
    data::user::UserRepository,
    model::{pagination::Pagination, user::CreateUserParams},
};
use entity::enums::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod active_ids_with_roles;
mod create;
mod get_paginated;
mod identity_taken;
