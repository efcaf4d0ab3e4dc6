//! Errors - ドメインエラー
//!
//! `Display` はそのままユーザー向けメッセージの後半になります
//! （"Could not update basket: " + message）。

use thiserror::Error;

use super::ids::{BasketName, PantryId};
use crate::ports::StoreError;

/// PantryError は manager / router が返すエラー
#[derive(Debug, Error)]
pub enum PantryError {
    /// Valid path shape, but the id is not a provisioned pantry.
    #[error("pantry with id: {0} not found")]
    UnknownPantry(PantryId),

    #[error("{0} does not exist")]
    BasketNotFound(BasketName),

    #[error("update data must be an object")]
    InvalidUpdatePayload,

    #[error("{0} is a reserved name")]
    ReservedBasketName(BasketName),

    /// Stored basket text is not JSON (written outside this service).
    #[error("basket {name} holds invalid JSON: {source}")]
    CorruptBasket {
        name: BasketName,
        #[source]
        source: serde_json::Error,
    },

    #[error("pantry details are not valid JSON: {0}")]
    CorruptDetails(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PantryError {
    /// Errors caused by the request itself (mapped to 400 at the boundary).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PantryError::UnknownPantry(_)
                | PantryError::BasketNotFound(_)
                | PantryError::InvalidUpdatePayload
                | PantryError::ReservedBasketName(_)
        )
    }
}
