#![allow(dead_code)]

use std::sync::Arc;

use souk_market::prelude::*;

pub const CATALOG: &str = include_str!("../fixtures/catalog.json");

pub fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_json_str(CATALOG).expect("fixture catalog parses"))
}

pub fn tree(store: &MemoryStore) -> CategoryTree {
    CategoryTree::new(store.snapshot().categories.clone())
}

pub fn engine(store: &Arc<MemoryStore>, config: EngineConfig) -> Arc<FilterEngine> {
    Arc::new(FilterEngine::new(store.clone(), config).with_history(store.clone()))
}

pub fn session(store: &Arc<MemoryStore>, config: EngineConfig) -> FilterSession {
    FilterSession::new(engine(store, config), store.clone())
}

pub fn ids(outcome: &SearchOutcome) -> Vec<&str> {
    outcome.listings.iter().map(|l| l.id.as_str()).collect()
}

/// Let spawned fire-and-forget tasks run.
pub async fn drain_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
