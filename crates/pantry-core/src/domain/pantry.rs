//! Pantry metadata and listing views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata stored under the sentinel key.
///
/// Fields are optional on purpose: a pantry that never had its details set
/// reports them as absent rather than empty. Values are kept as whatever JSON
/// the client sent; `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePantryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl UpdatePantryDetails {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            description: Some(Value::String(description.into())),
        }
    }
}

/// One entry of the pantry's basket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketSummary {
    pub name: String,
    /// Remaining seconds, `-1` when the basket never expires.
    pub ttl: i64,
}

/// Response body of `GET /apiv1/pantry/{id}`.
///
/// `errors`, `notifications` and `percent_full` have no backing computation
/// yet; they are always emitted so the field set stays stable for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    pub errors: Vec<String>,
    pub notifications: bool,
    pub percent_full: u8,
    pub baskets: Vec<BasketSummary>,
}

impl PantryDetails {
    pub fn new(details: UpdatePantryDetails, baskets: Vec<BasketSummary>) -> Self {
        Self {
            name: details.name,
            description: details.description,
            errors: Vec::new(),
            notifications: false,
            percent_full: 0,
            baskets,
        }
    }
}
