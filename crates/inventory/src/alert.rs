//! Post-sale stock level alerts.

use serde::{Deserialize, Serialize};

/// Remaining stock strictly below this (and above zero) raises a low-stock alert.
pub const LOW_STOCK_THRESHOLD: u64 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockAlert {
    /// Remaining stock is in `(0, LOW_STOCK_THRESHOLD)`.
    Low { remaining: u64 },
    /// The product is sold out.
    OutOfStock,
}

impl StockAlert {
    /// Classify the stock level left after a sale.
    pub fn after_sale(remaining: u64) -> Option<Self> {
        match remaining {
            0 => Some(Self::OutOfStock),
            n if n < LOW_STOCK_THRESHOLD => Some(Self::Low { remaining: n }),
            _ => None,
        }
    }
}
