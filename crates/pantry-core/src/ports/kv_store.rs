//! KvStore port - 外部の key-value ストア
//!
//! pantry ごとに 1 つの namespace があり、KvStore はその namespace に
//! スコープされたハンドルです。
//!
//! # 設計原則
//! - 操作は get / put / delete / list の 4 つだけ
//! - 有効期限はストア側の機能（put 時に expire_after_seconds を渡す）
//! - 複数キーのトランザクションは提供しない

use async_trait::async_trait;
use thiserror::Error;

/// StoreError はストア呼び出しの失敗
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Value read back from the store together with its expiration metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: String,
    /// Absolute epoch seconds, `None` when the key never expires.
    pub expiration: Option<i64>,
}

/// One key of a namespace listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub name: String,
    pub expiration: Option<i64>,
}

/// Per-write options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub expire_after_seconds: Option<u64>,
}

impl PutOptions {
    pub fn expire_after(seconds: Option<u64>) -> Self {
        Self {
            expire_after_seconds: seconds,
        }
    }
}

/// KvStore は namespace 単位のストアハンドル
///
/// # Thread Safety
/// - `Send + Sync` を要求（リクエストごとに並行して使われる）
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a value, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<StoredEntry>, StoreError>;

    /// Create or overwrite a value.
    async fn put(&self, key: &str, value: String, options: PutOptions) -> Result<(), StoreError>;

    /// Remove a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List every live key of the namespace, in the store's own order.
    async fn list(&self) -> Result<Vec<KeyInfo>, StoreError>;
}
