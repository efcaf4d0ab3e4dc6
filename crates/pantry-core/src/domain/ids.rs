//! Domain identifiers.
//!
//! - `PantryId`: デプロイ時に登録された namespace を指す外部 ID
//! - `BasketName`: pantry 内でユニークなドキュメント名
//! - `RequestId`: ログ相関用の ULID
//!
//! `PantryId` / `BasketName` は URL のパスセグメントをそのまま保持します
//! （percent-decoding はしない）。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Reserved key holding pantry metadata. Never reachable as a basket.
pub const DETAILS_KEY: &str = "__details__";

/// PantryId は provisioned namespace を指す不透明な識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PantryId(String);

impl PantryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PantryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PantryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// BasketName は pantry 内の basket キー
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketName(String);

impl BasketName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The metadata sentinel shares the key space with baskets.
    pub fn is_reserved(&self) -> bool {
        self.0 == DETAILS_KEY
    }
}

impl fmt::Display for BasketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BasketName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// RequestId はリクエストごとのログ相関 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(Ulid);

impl RequestId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for RequestId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}
