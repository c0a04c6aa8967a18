mod inventory_item;
mod material;
mod notification;
mod request;
mod user;
