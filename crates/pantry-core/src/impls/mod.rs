//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryKvStore**: プロセス内の key-value ストア（開発用・テスト用）
//!
//! managed ストアへの接続は `KvStore` を実装すれば差し替えられます。

pub mod inmem_kv;

pub use self::inmem_kv::InMemoryKvStore;
