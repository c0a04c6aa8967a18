use crate::server::{
    data::material::MaterialRepository,
    model::{
        material::{CreateMaterialParams, MaterialFilter, MaterialSortField},
        pagination::Pagination,
    },
    util::sort::Sort,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod set_stock_if_unchanged;
mod soft_delete;
