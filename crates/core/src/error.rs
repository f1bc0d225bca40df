//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (input
/// quantities, invariants, stock rules). Snapshot IO failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A quantity was not a positive whole number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A sale referenced a product the inventory does not track.
    #[error("product '{0}' is not tracked in the inventory")]
    NotTracked(String),

    /// A sale asked for more units than are on hand.
    #[error("cannot sell {requested} units of {product}: only {available} available")]
    InsufficientStock {
        product: String,
        requested: u64,
        available: u64,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn not_tracked(product: impl Into<String>) -> Self {
        Self::NotTracked(product.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
