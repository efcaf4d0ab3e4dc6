//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 同じ pantry id の二重登録は build() 時に BuildError
//! - pantry が 1 つもなければ BuildError（何も提供できないため）

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::{BasketManager, PantryManager, PantryRegistry};
use crate::config::Config;
use crate::domain::{BasketTtl, PantryId};
use crate::impls::InMemoryKvStore;
use crate::ports::{Clock, KvStore, SystemClock};

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Duplicate pantry ids: {0:?}. Each pantry id must be bound once.")]
    DuplicatePantries(Vec<PantryId>),

    #[error("No pantries configured.")]
    NoPantries,
}

enum Binding {
    Store(Arc<dyn KvStore>),
    InMemory(String),
}

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .basket_ttl(BasketTtl::from_seconds(3600))
///     .in_memory_pantry("TEST_PANTRY_ID", "test")
///     .build()?;
/// ```
///
/// 同じ namespace を指す in-memory pantry は 1 つのストアを共有します。
pub struct AppBuilder {
    clock: Arc<dyn Clock>,
    basket_ttl: BasketTtl,
    bindings: Vec<(PantryId, Binding)>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            basket_ttl: BasketTtl::disabled(),
            bindings: Vec::new(),
        }
    }

    /// Pantries and TTL from a loaded config, backed by in-memory namespaces.
    pub fn from_config(config: &Config) -> Self {
        config.pantries.iter().fold(
            Self::new().basket_ttl(config.basket_ttl_seconds),
            |builder, binding| builder.in_memory_pantry(binding.id.as_str(), binding.namespace()),
        )
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn basket_ttl(mut self, ttl: BasketTtl) -> Self {
        self.basket_ttl = ttl;
        self
    }

    /// Bind a pantry id to an existing store handle.
    pub fn pantry(mut self, id: impl Into<String>, store: Arc<dyn KvStore>) -> Self {
        self.bindings.push((PantryId::new(id), Binding::Store(store)));
        self
    }

    /// Bind a pantry id to an in-memory namespace.
    pub fn in_memory_pantry(mut self, id: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.bindings
            .push((PantryId::new(id), Binding::InMemory(namespace.into())));
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        if self.bindings.is_empty() {
            return Err(BuildError::NoPantries);
        }

        let mut registry = PantryRegistry::new();
        let mut namespaces: HashMap<String, Arc<dyn KvStore>> = HashMap::new();
        let mut duplicates = Vec::new();

        for (id, binding) in self.bindings {
            let store = match binding {
                Binding::Store(store) => store,
                Binding::InMemory(namespace) => namespaces
                    .entry(namespace)
                    .or_insert_with(|| {
                        Arc::new(InMemoryKvStore::new(self.clock.clone())) as Arc<dyn KvStore>
                    })
                    .clone(),
            };
            if registry.insert(id.clone(), store).is_some() {
                duplicates.push(id);
            }
        }

        if !duplicates.is_empty() {
            return Err(BuildError::DuplicatePantries(duplicates));
        }

        tracing::debug!(
            pantries = registry.len(),
            namespaces = namespaces.len(),
            basket_ttl = %self.basket_ttl,
            "app wired"
        );

        Ok(App {
            registry: Arc::new(registry),
            clock: self.clock,
            basket_ttl: self.basket_ttl,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App は pantry の解決と manager の生成を担う
///
/// Manager はリクエストごとに作り直します（状態はすべてストア側）。
#[derive(Clone)]
pub struct App {
    registry: Arc<PantryRegistry>,
    clock: Arc<dyn Clock>,
    basket_ttl: BasketTtl,
}

impl App {
    pub fn registry(&self) -> &PantryRegistry {
        &self.registry
    }

    pub fn basket_ttl(&self) -> BasketTtl {
        self.basket_ttl
    }

    pub fn pantry_manager(&self, id: &PantryId) -> Option<PantryManager> {
        let store = self.registry.resolve(id)?;
        Some(PantryManager::new(store, self.clock.clone()))
    }

    pub fn basket_manager(&self, id: &PantryId) -> Option<BasketManager> {
        let store = self.registry.resolve(id)?;
        Some(BasketManager::new(store, self.clock.clone(), self.basket_ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PantryBinding;
    use crate::domain::BasketName;
    use serde_json::json;

    #[test]
    fn test_build_success() {
        let app = AppBuilder::new().in_memory_pantry("p1", "ns1").build();
        assert!(app.is_ok());
    }

    #[test]
    fn test_build_without_pantries() {
        assert!(matches!(
            AppBuilder::new().build(),
            Err(BuildError::NoPantries)
        ));
    }

    #[test]
    fn test_build_duplicate_pantries() {
        let app = AppBuilder::new()
            .in_memory_pantry("p1", "ns1")
            .in_memory_pantry("p1", "ns2")
            .build();
        assert!(matches!(
            app,
            Err(BuildError::DuplicatePantries(ids)) if ids == vec![PantryId::from("p1")]
        ));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            basket_ttl_seconds: BasketTtl::from_seconds(30),
            pantries: vec![PantryBinding::new("a"), PantryBinding::new("b")],
            ..Config::default()
        };
        let app = AppBuilder::from_config(&config).build().unwrap();

        assert_eq!(app.registry().ids(), vec![PantryId::from("a"), PantryId::from("b")]);
        assert_eq!(app.basket_ttl().seconds(), Some(30));
        assert!(app.pantry_manager(&PantryId::from("c")).is_none());
    }

    #[tokio::test]
    async fn test_shared_namespace_shares_store() {
        let app = AppBuilder::new()
            .in_memory_pantry("alias-a", "shared")
            .in_memory_pantry("alias-b", "shared")
            .in_memory_pantry("isolated", "other")
            .build()
            .unwrap();
        let basket = BasketName::from("b");

        app.basket_manager(&PantryId::from("alias-a"))
            .unwrap()
            .create_or_replace(&basket, &json!({"n": 1}))
            .await
            .unwrap();

        let via_b = app.basket_manager(&PantryId::from("alias-b")).unwrap();
        assert!(via_b.get(&basket).await.unwrap().is_some());
        let isolated = app.basket_manager(&PantryId::from("isolated")).unwrap();
        assert!(isolated.get(&basket).await.unwrap().is_none());
    }
}
