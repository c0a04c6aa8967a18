use crate::server::{
    data::inventory::{item::InventoryItemRepository, transaction::InventoryTransactionRepository},
    model::{
        inventory::{InventoryTransactionFilter, ItemLevels, RecordTransactionParams},
        pagination::Pagination,
    },
};
use entity::enums::MovementKind;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_with_relations;
mod record_transaction;
mod set_levels_if_unchanged;
mod set_quantity_if_unchanged;
