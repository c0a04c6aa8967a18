pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_role_table;
mod m20260105_000003_create_employee_table;
mod m20260105_000004_create_project_table;
mod m20260105_000005_create_project_user_table;
mod m20260105_000006_create_project_employee_table;
mod m20260105_000007_create_uom_table;
mod m20260105_000008_create_institution_table;
mod m20260105_000009_create_warehouse_table;
mod m20260105_000010_create_material_table;
mod m20260105_000011_create_material_attribute_table;
mod m20260105_000012_create_inventory_table;
mod m20260105_000013_create_inventory_item_table;
mod m20260105_000014_create_inventory_reserve_table;
mod m20260105_000015_create_inventory_transaction_table;
mod m20260105_000016_create_request_table;
mod m20260105_000017_create_delivery_table;
mod m20260105_000018_create_stock_movement_table;
mod m20260105_000019_create_notification_table;
mod m20260105_000020_create_file_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_role_table::Migration),
            Box::new(m20260105_000003_create_employee_table::Migration),
            Box::new(m20260105_000004_create_project_table::Migration),
            Box::new(m20260105_000005_create_project_user_table::Migration),
            Box::new(m20260105_000006_create_project_employee_table::Migration),
            Box::new(m20260105_000007_create_uom_table::Migration),
            Box::new(m20260105_000008_create_institution_table::Migration),
            Box::new(m20260105_000009_create_warehouse_table::Migration),
            Box::new(m20260105_000010_create_material_table::Migration),
            Box::new(m20260105_000011_create_material_attribute_table::Migration),
            Box::new(m20260105_000012_create_inventory_table::Migration),
            Box::new(m20260105_000013_create_inventory_item_table::Migration),
            Box::new(m20260105_000014_create_inventory_reserve_table::Migration),
            Box::new(m20260105_000015_create_inventory_transaction_table::Migration),
            Box::new(m20260105_000016_create_request_table::Migration),
            Box::new(m20260105_000017_create_delivery_table::Migration),
            Box::new(m20260105_000018_create_stock_movement_table::Migration),
            Box::new(m20260105_000019_create_notification_table::Migration),
            Box::new(m20260105_000020_create_file_table::Migration),
        ]
    }
}
