//! PantryRegistry - pantry id → store ハンドルの対応表
//!
//! どの pantry が存在するかはデプロイ時の設定だけで決まり、
//! ストアの中身は見ません。

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::PantryId;
use crate::ports::KvStore;

#[derive(Default)]
pub struct PantryRegistry {
    stores: HashMap<PantryId, Arc<dyn KvStore>>,
}

impl PantryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous handle when the id was already bound.
    pub fn insert(&mut self, id: PantryId, store: Arc<dyn KvStore>) -> Option<Arc<dyn KvStore>> {
        self.stores.insert(id, store)
    }

    pub fn resolve(&self, id: &PantryId) -> Option<Arc<dyn KvStore>> {
        self.stores.get(id).cloned()
    }

    pub fn contains(&self, id: &PantryId) -> bool {
        self.stores.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn ids(&self) -> Vec<PantryId> {
        let mut ids: Vec<_> = self.stores.keys().cloned().collect();
        ids.sort();
        ids
    }
}
