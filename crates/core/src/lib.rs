//! `stockkeeper-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no persistence).

pub mod aggregate;
pub mod error;
pub mod product;
pub mod quantity;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use product::ProductName;
pub use quantity::Quantity;
