//! Ports - 抽象化レイヤー
//!
//! 外部システム（managed key-value ストア、時計、ID 生成）への
//! インターフェースです。実装は `impls` に置きます。

pub mod clock;
pub mod id_generator;
pub mod kv_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{RequestIdGenerator, UlidRequestIds};
pub use self::kv_store::{KeyInfo, KvStore, PutOptions, StoreError, StoredEntry};
