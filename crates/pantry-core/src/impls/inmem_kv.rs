//! InMemoryKvStore - 開発用・テスト用の key-value ストア
//!
//! # 実装詳細
//! - BTreeMap<String, StoredEntry> でキーを保持（list はキーの辞書順）
//! - 有効期限は Clock で判定し、期限切れのキーは読み出し時に削除
//! - std::sync::Mutex で排他制御（ロック中に await しない）

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::expiration_after;
use crate::ports::{Clock, KeyInfo, KvStore, PutOptions, StoreError, StoredEntry};

/// InMemoryKvStore は 1 つの namespace を表すストア
///
/// # 使用例
/// ```ignore
/// let store = InMemoryKvStore::new(Arc::new(SystemClock));
/// store.put("basket", "{}".into(), PutOptions::expire_after(Some(60))).await?;
/// let entry = store.get("basket").await?;
/// ```
pub struct InMemoryKvStore {
    entries: Mutex<BTreeMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryKvStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, StoredEntry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("namespace lock poisoned: {e}")))
    }

    fn now_secs(&self) -> i64 {
        self.clock.now().timestamp()
    }
}

fn is_expired(entry: &StoredEntry, now_secs: i64) -> bool {
    entry.expiration.is_some_and(|expiration| expiration <= now_secs)
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        let now = self.now_secs();
        let mut entries = self.lock()?;
        let expired = match entries.get(key) {
            Some(entry) => is_expired(entry, now),
            None => return Ok(None),
        };
        if expired {
            tracing::debug!(key, "dropping expired key");
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String, options: PutOptions) -> Result<(), StoreError> {
        let expiration = options
            .expire_after_seconds
            .map(|ttl| expiration_after(self.clock.now(), ttl));
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), StoredEntry { value, expiration });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<KeyInfo>, StoreError> {
        let now = self.now_secs();
        let mut entries = self.lock()?;
        entries.retain(|_, entry| !is_expired(entry, now));
        Ok(entries
            .iter()
            .map(|(name, entry)| KeyInfo {
                name: name.clone(),
                expiration: entry.expiration,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    fn store_at_noon() -> (InMemoryKvStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ));
        (InMemoryKvStore::new(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, _) = store_at_noon();
        store
            .put("k", "{\"a\":1}".into(), PutOptions::default())
            .await
            .unwrap();

        let entry = store.get("k").await.unwrap().unwrap();
        assert_eq!(entry.value, "{\"a\":1}");
        assert_eq!(entry.expiration, None);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (store, _) = store_at_noon();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expiration_is_absolute_epoch() {
        let (store, clock) = store_at_noon();
        store
            .put("k", "1".into(), PutOptions::expire_after(Some(60)))
            .await
            .unwrap();

        let entry = store.get("k").await.unwrap().unwrap();
        assert_eq!(entry.expiration, Some(clock.now().timestamp() + 60));
    }

    #[tokio::test]
    async fn test_expired_keys_disappear() {
        let (store, clock) = store_at_noon();
        store
            .put("short", "1".into(), PutOptions::expire_after(Some(60)))
            .await
            .unwrap();
        store
            .put("forever", "2".into(), PutOptions::default())
            .await
            .unwrap();

        clock.advance(Duration::seconds(59));
        assert!(store.get("short").await.unwrap().is_some());

        clock.advance(Duration::seconds(1));
        assert_eq!(store.get("short").await.unwrap(), None);
        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|k| k.name).collect();
        assert_eq!(names, vec!["forever"]);
    }

    #[tokio::test]
    async fn test_put_without_ttl_clears_expiration() {
        let (store, _) = store_at_noon();
        store
            .put("k", "1".into(), PutOptions::expire_after(Some(60)))
            .await
            .unwrap();
        store.put("k", "2".into(), PutOptions::default()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().unwrap().expiration, None);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_key() {
        let (store, _) = store_at_noon();
        for key in ["replaceBasket", "__details__", "defaultBasket", "deleteBasket"] {
            store.put(key, "{}".into(), PutOptions::default()).await.unwrap();
        }

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|k| k.name).collect();
        assert_eq!(
            names,
            vec!["__details__", "defaultBasket", "deleteBasket", "replaceBasket"]
        );
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let (store, _) = store_at_noon();
        store.delete("ghost").await.unwrap();
        store.put("k", "1".into(), PutOptions::default()).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
