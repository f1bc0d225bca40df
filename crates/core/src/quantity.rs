//! Positive stock quantities parsed from free-text input.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A strictly positive number of units moved by a restock or a sale.
///
/// Stock levels themselves may be zero; a movement never is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(units: u64) -> Result<Self, DomainError> {
        if units == 0 {
            return Err(DomainError::invalid_quantity(
                "quantity must be a positive number",
            ));
        }
        Ok(Self(units))
    }

    /// Parse user input the way a lenient integer coercion does: surrounding
    /// whitespace and an optional sign, then the leading run of digits.
    /// Anything after the digits is ignored (`"5kg"` is 5, `"2.5"` is 2).
    /// Input without leading digits, or whose value is not positive, is
    /// rejected.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = unsigned
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len == 0 {
            return Err(DomainError::invalid_quantity(format!(
                "'{trimmed}' is not a positive whole number"
            )));
        }

        let digits = &unsigned[..digits_len];
        let units: u64 = digits
            .parse()
            .map_err(|_| DomainError::invalid_quantity(format!("'{trimmed}' is too large")))?;
        if negative && units > 0 {
            return Err(DomainError::invalid_quantity(format!(
                "'{trimmed}' is negative"
            )));
        }
        Self::new(units)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Quantity {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}
