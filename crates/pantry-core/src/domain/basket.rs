//! Basket read model.

use serde_json::Value;

use super::ids::BasketName;

/// A basket as returned by a read.
///
/// `raw` is the stored JSON text, handed back to HTTP callers untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    pub name: BasketName,
    pub raw: String,
    /// Remaining seconds after the read (a refreshed basket reports the full window).
    pub ttl_seconds: i64,
}

impl Basket {
    pub fn content(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.raw)
    }
}
