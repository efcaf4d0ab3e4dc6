//! Path shapes and HTTP methods understood by the router.
//!
//! Only two shapes exist:
//! - `/apiv1/pantry/{pantryId}`
//! - `/apiv1/pantry/{pantryId}/basket/{basketId}`
//!
//! Segments are taken verbatim (no percent-decoding).

use std::fmt;

use crate::domain::{BasketName, PantryId};

pub const API_VERSION: &str = "apiv1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Pantry { pantry: PantryId },
    Basket { pantry: PantryId, basket: BasketName },
}

impl Route {
    /// Structural match on the path. `None` means "Not Found".
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["", API_VERSION, "pantry", pantry] => Some(Route::Pantry {
                pantry: PantryId::from(*pantry),
            }),
            ["", API_VERSION, "pantry", pantry, "basket", basket] => Some(Route::Basket {
                pantry: PantryId::from(*pantry),
                basket: BasketName::from(*basket),
            }),
            _ => None,
        }
    }

    pub fn pantry(&self) -> &PantryId {
        match self {
            Route::Pantry { pantry } | Route::Basket { pantry, .. } => pantry,
        }
    }

    /// Resource named in error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Route::Pantry { .. } => "pantry",
            Route::Basket { .. } => "basket",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Put => f.write_str("PUT"),
            Method::Delete => f.write_str("DELETE"),
            Method::Other(other) => f.write_str(other),
        }
    }
}
