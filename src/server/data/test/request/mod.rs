use crate::server::{
    data::request::RequestRepository,
    model::{
        pagination::Pagination,
        request::{CreateRequestParams, RequestFilter, RequestSortField, UpdateRequestParams},
    },
    util::sort::Sort,
};
use entity::enums::RequestStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_open_for_material;
mod create;
mod get_paginated;
mod transition_status;
mod update_if_pending;
