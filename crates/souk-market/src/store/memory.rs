//! In-memory store backed by a catalog snapshot.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::catalog::{Brand, Category, Model, Region, SubRegion};
use crate::error::StoreError;
use crate::ids::BrandId;
use crate::listing::Listing;
use crate::schema::BrandType;
use crate::search::{ListingQuery, SearchHistoryEntry};
use crate::store::{ListingStore, ReferenceStore, SearchHistoryStore, StoreResult};

/// Everything a store serves, as one serializable document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub sub_regions: Vec<SubRegion>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

impl CatalogSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Store over a fixed snapshot.
///
/// Query and history failures can be switched on to exercise degraded paths.
/// Every Phase A query is logged for inspection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: CatalogSnapshot,
    queries: Mutex<Vec<ListingQuery>>,
    history: Mutex<Vec<SearchHistoryEntry>>,
    fail_queries: AtomicBool,
    fail_history: AtomicBool,
    fail_reference: AtomicBool,
}

impl MemoryStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(CatalogSnapshot::from_json_str(json)?))
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// Make every listing query fail.
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make every history write fail.
    pub fn set_fail_history(&self, fail: bool) {
        self.fail_history.store(fail, Ordering::SeqCst);
    }

    /// Make every reference read fail.
    pub fn set_fail_reference(&self, fail: bool) {
        self.fail_reference.store(fail, Ordering::SeqCst);
    }

    /// Queries received so far, oldest first.
    pub async fn queries(&self) -> Vec<ListingQuery> {
        self.queries.lock().await.clone()
    }

    /// History entries recorded so far, oldest first.
    pub async fn history(&self) -> Vec<SearchHistoryEntry> {
        self.history.lock().await.clone()
    }

    fn check_reference(&self) -> StoreResult<()> {
        if self.fail_reference.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reference data offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn query_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>> {
        self.queries.lock().await.push(query.clone());

        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::QueryError("listing query rejected".into()));
        }

        let listings: Vec<Listing> = self
            .snapshot
            .listings
            .iter()
            .filter(|l| query.matches(l))
            .cloned()
            .collect();
        debug!(count = listings.len(), "Memory store answered query");
        Ok(listings)
    }
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        self.check_reference()?;
        Ok(self.snapshot.categories.clone())
    }

    async fn brands(&self, brand_type: BrandType) -> StoreResult<Vec<Brand>> {
        self.check_reference()?;
        let mut brands: Vec<Brand> = self
            .snapshot
            .brands
            .iter()
            .filter(|b| b.brand_type == brand_type)
            .cloned()
            .collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    async fn models(&self, brand_id: &BrandId) -> StoreResult<Vec<Model>> {
        self.check_reference()?;
        let mut models: Vec<Model> = self
            .snapshot
            .models
            .iter()
            .filter(|m| &m.brand_id == brand_id)
            .cloned()
            .collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(models)
    }

    async fn regions(&self) -> StoreResult<Vec<Region>> {
        self.check_reference()?;
        Ok(self.snapshot.regions.clone())
    }

    async fn sub_regions(&self, region_code: &str) -> StoreResult<Vec<SubRegion>> {
        self.check_reference()?;
        Ok(self
            .snapshot
            .sub_regions
            .iter()
            .filter(|s| s.region_code == region_code)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchHistoryStore for MemoryStore {
    async fn record(&self, entry: SearchHistoryEntry) -> StoreResult<()> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("history table offline".into()));
        }
        self.history.lock().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingStatus;

    fn store() -> MemoryStore {
        MemoryStore::new(CatalogSnapshot {
            brands: vec![
                Brand::new("b2", "Toyota", BrandType::Vehicles),
                Brand::new("b1", "Renault", BrandType::Vehicles),
                Brand::new("b3", "Samsung", BrandType::Electronics),
            ],
            models: vec![Model::new("m1", "b2", "Yaris"), Model::new("m2", "b2", "Corolla")],
            listings: vec![
                Listing::new("1", "Toyota Yaris", "1"),
                Listing::new("2", "Golf", "1").with_status(ListingStatus::Expired),
            ],
            ..CatalogSnapshot::default()
        })
    }

    #[tokio::test]
    async fn test_query_returns_active_and_logs() {
        let store = store();
        let listings = store.query_listings(&ListingQuery::new()).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(store.queries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_query_failure() {
        let store = store();
        store.set_fail_queries(true);
        let err = store.query_listings(&ListingQuery::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::QueryError(_)));
    }

    #[tokio::test]
    async fn test_brands_by_type_sorted() {
        let store = store();
        let brands = store.brands(BrandType::Vehicles).await.unwrap();
        let names: Vec<_> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Renault", "Toyota"]);

        let models = store.models(&BrandId::new("b2")).await.unwrap();
        assert_eq!(models[0].name, "Corolla");
    }

    #[tokio::test]
    async fn test_reference_failure() {
        let store = store();
        store.set_fail_reference(true);
        assert!(store.regions().await.is_err());
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = CatalogSnapshot::from_json_str(
            r#"{"listings": [{"id": "l1", "title": "Villa", "category_id": "2"}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.listings.len(), 1);
        assert!(snapshot.categories.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_deserialize_error() {
        let err = MemoryStore::from_json_str(r#"{"listings": [{"id": 7}]}"#)
            .err()
            .expect("malformed snapshot is rejected");
        assert!(matches!(err, StoreError::DeserializeError(_)));
    }
}
