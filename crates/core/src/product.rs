//! Product names and the normalization rule that makes them unique keys.

use serde::{Deserialize, Serialize};

/// Normalized product name.
///
/// Normalization trims surrounding whitespace and uppercases the first
/// character; the remainder is kept as typed. `"  rice"`, `"Rice"` and
/// `"rice "` are therefore the same product, while `"rICE"` is a different one.
/// Any string is accepted; a blank input becomes the empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Apply the product-name normalization rule.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}
