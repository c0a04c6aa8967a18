pub use super::delivery::Entity as Delivery;
pub use super::employee::Entity as Employee;
pub use super::file::Entity as File;
pub use super::institution::Entity as Institution;
pub use super::inventory::Entity as Inventory;
pub use super::inventory_item::Entity as InventoryItem;
pub use super::inventory_reserve::Entity as InventoryReserve;
pub use super::inventory_transaction::Entity as InventoryTransaction;
pub use super::material::Entity as Material;
pub use super::material_attribute::Entity as MaterialAttribute;
pub use super::notification::Entity as Notification;
pub use super::project::Entity as Project;
pub use super::project_employee::Entity as ProjectEmployee;
pub use super::project_user::Entity as ProjectUser;
pub use super::request::Entity as Request;
pub use super::role::Entity as Role;
pub use super::stock_movement::Entity as StockMovement;
pub use super::uom::Entity as Uom;
pub use super::user::Entity as User;
pub use super::warehouse::Entity as Warehouse;
