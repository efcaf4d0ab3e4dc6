//! App - アプリケーション層
//!
//! ports を組み合わせて pantry / basket の操作を実装します。
//!
//! # 主要コンポーネント
//! - **PantryManager**: メタデータと basket 一覧
//! - **BasketManager**: basket の CRUD、deep merge、sliding expiration
//! - **PantryRegistry**: pantry id → ストアハンドル
//! - **AppBuilder**: 設定からのワイヤリング

pub mod basket;
pub mod builder;
pub mod pantry;
pub mod registry;

pub use self::basket::BasketManager;
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::pantry::PantryManager;
pub use self::registry::PantryRegistry;
