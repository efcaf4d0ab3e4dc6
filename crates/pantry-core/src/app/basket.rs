//! BasketManager - basket の CRUD、deep merge、TTL の更新
//!
//! # TTL
//! - 書き込み（create / replace / update）のたびに設定 TTL を付け直す
//! - 読み出し成功時も同じ内容を書き直して期限を延長する（sliding expiration）
//!
//! # 並行性
//! update は get → merge → put の 3 ステップで、アトミックではありません。
//! 同じ basket への同時 update は両方が同じ元データを読み、後から put した
//! 方だけが残ります（last-write-wins）。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    Basket, BasketName, BasketTtl, PantryError, expiration_after, merged, remaining_ttl,
};
use crate::ports::{Clock, KvStore, PutOptions};

/// BasketManager は 1 つの pantry 内の basket を操作
pub struct BasketManager {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    ttl: BasketTtl,
}

impl BasketManager {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, ttl: BasketTtl) -> Self {
        Self { store, clock, ttl }
    }

    fn put_options(&self) -> PutOptions {
        PutOptions::expire_after(self.ttl.seconds())
    }

    fn ensure_usable(name: &BasketName) -> Result<(), PantryError> {
        if name.is_reserved() {
            return Err(PantryError::ReservedBasketName(name.clone()));
        }
        Ok(())
    }

    /// Overwrite the basket with `content`. A missing basket is simply created.
    pub async fn create_or_replace(
        &self,
        name: &BasketName,
        content: &Value,
    ) -> Result<(), PantryError> {
        Self::ensure_usable(name)?;
        self.store
            .put(name.as_str(), content.to_string(), self.put_options())
            .await?;
        tracing::info!(basket = %name, ttl = %self.ttl, "basket written");
        Ok(())
    }

    /// Read a basket, extending its lease when a TTL is configured.
    ///
    /// `Ok(None)` means the basket does not exist.
    pub async fn get(&self, name: &BasketName) -> Result<Option<Basket>, PantryError> {
        Self::ensure_usable(name)?;
        let Some(entry) = self.store.get(name.as_str()).await? else {
            return Ok(None);
        };

        let ttl_seconds = match self.ttl.seconds() {
            Some(window) => {
                self.store
                    .put(name.as_str(), entry.value.clone(), self.put_options())
                    .await?;
                tracing::debug!(basket = %name, window, "basket ttl refreshed");
                let now = self.clock.now();
                remaining_ttl(Some(expiration_after(now, window)), now)
            }
            None => remaining_ttl(entry.expiration, self.clock.now()),
        };

        Ok(Some(Basket {
            name: name.clone(),
            raw: entry.value,
            ttl_seconds,
        }))
    }

    /// Deep-merge `patch` onto the stored document.
    ///
    /// Existence is checked before the payload shape, so a missing basket
    /// always reports `BasketNotFound`.
    pub async fn update(&self, name: &BasketName, patch: Value) -> Result<(), PantryError> {
        let existing = self
            .get(name)
            .await?
            .ok_or_else(|| PantryError::BasketNotFound(name.clone()))?;

        if !patch.is_object() {
            return Err(PantryError::InvalidUpdatePayload);
        }

        let current = existing
            .content()
            .map_err(|source| PantryError::CorruptBasket {
                name: name.clone(),
                source,
            })?;
        let updated = merged(current, patch);

        self.store
            .put(name.as_str(), updated.to_string(), self.put_options())
            .await?;
        tracing::info!(basket = %name, ttl = %self.ttl, "basket merged");
        Ok(())
    }

    /// Remove the basket. Absent baskets are not an error.
    pub async fn delete(&self, name: &BasketName) -> Result<(), PantryError> {
        Self::ensure_usable(name)?;
        self.store.delete(name.as_str()).await?;
        tracing::info!(basket = %name, "basket deleted");
        Ok(())
    }
}
