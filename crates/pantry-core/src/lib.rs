//! pantry-core
//!
//! JSON document storage ("baskets") grouped into "pantries", served over a
//! small HTTP surface and persisted in an external key-value store.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, pantry / basket ビュー, TTL, deep merge, errors）
//! - **ports**: 抽象化レイヤー（KvStore, Clock, RequestIdGenerator）
//! - **impls**: 実装（InMemoryKvStore）
//! - **app**: アプリケーションロジック（PantryManager, BasketManager, AppBuilder）
//! - **http**: ルーティングとステータスコードの対応付け
//! - **config**: デプロイ設定（TOML）

pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod impls;
pub mod ports;
