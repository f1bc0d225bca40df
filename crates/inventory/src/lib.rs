//! Inventory domain module (event-sourced).
//!
//! This crate contains the stock rules for the supermarket inventory,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod alert;
pub mod stock;

pub use alert::{LOW_STOCK_THRESHOLD, StockAlert};
pub use stock::{
    Inventory, InventoryCommand, InventoryEvent, ItemAdded, Listing, Restock, Restocked, Sell,
    Sold,
};
