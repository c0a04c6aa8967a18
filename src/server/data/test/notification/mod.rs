use crate::server::{data::notification::NotificationRepository, model::pagination::Pagination};
use chrono::{Duration, Utc};
use entity::enums::NotificationCategory;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete_read;
mod exists_unread;
mod get_paginated;
mod mark_read;
