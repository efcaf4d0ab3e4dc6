//! PantryManager - pantry メタデータと basket 一覧

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    BasketSummary, DETAILS_KEY, PantryDetails, PantryError, UpdatePantryDetails, remaining_ttl,
};
use crate::ports::{Clock, KvStore, PutOptions};

pub struct PantryManager {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl PantryManager {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Metadata plus every basket with its remaining TTL.
    ///
    /// Baskets come back in the store's listing order (lexicographic for
    /// the in-memory store); no ordering is imposed here.
    pub async fn get_details(&self) -> Result<PantryDetails, PantryError> {
        let details = self.read_details().await?;
        let now = self.clock.now();

        let baskets = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|key| key.name != DETAILS_KEY)
            .map(|key| BasketSummary {
                ttl: remaining_ttl(key.expiration, now),
                name: key.name,
            })
            .collect();

        Ok(PantryDetails::new(details, baskets))
    }

    /// Full replace of the metadata record. Absent fields stay absent.
    pub async fn set_details(&self, update: &UpdatePantryDetails) -> Result<(), PantryError> {
        let value = serde_json::to_string(update).map_err(PantryError::CorruptDetails)?;
        self.store
            .put(DETAILS_KEY, value, PutOptions::default())
            .await?;
        tracing::info!(name = ?update.name, "pantry details replaced");
        Ok(())
    }

    // `null` name/description values read back as absent.
    async fn read_details(&self) -> Result<UpdatePantryDetails, PantryError> {
        let Some(entry) = self.store.get(DETAILS_KEY).await? else {
            return Ok(UpdatePantryDetails::default());
        };
        let value: Value = serde_json::from_str(&entry.value).map_err(PantryError::CorruptDetails)?;
        let field = |key: &str| value.get(key).filter(|v| !v.is_null()).cloned();

        Ok(UpdatePantryDetails {
            name: field("name"),
            description: field("description"),
        })
    }
}
