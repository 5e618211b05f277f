//! Store contracts the search core talks to.
//!
//! The core never reaches a database directly. A listing store answers the
//! Phase A query, a reference store serves the catalog lists behind the facet
//! panel, and a history store records searches. [`MemoryStore`] implements all
//! three over a JSON snapshot.

mod memory;

use async_trait::async_trait;

use crate::catalog::{Brand, Category, Model, Region, SubRegion};
use crate::error::StoreError;
use crate::ids::BrandId;
use crate::listing::Listing;
use crate::schema::BrandType;
use crate::search::{ListingQuery, SearchHistoryEntry};

pub use memory::{CatalogSnapshot, MemoryStore};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Listing backend answering the structured query.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Run a Phase A query. Only active listings are returned.
    async fn query_listings(&self, query: &ListingQuery) -> StoreResult<Vec<Listing>>;
}

/// Catalog reference reads.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// The full category tree, flattened.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    /// Brands of one brand type.
    async fn brands(&self, brand_type: BrandType) -> StoreResult<Vec<Brand>>;

    /// Models of one brand.
    async fn models(&self, brand_id: &BrandId) -> StoreResult<Vec<Model>>;

    async fn regions(&self) -> StoreResult<Vec<Region>>;

    /// Sub-regions of one region code.
    async fn sub_regions(&self, region_code: &str) -> StoreResult<Vec<SubRegion>>;
}

/// Search history sink.
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    async fn record(&self, entry: SearchHistoryEntry) -> StoreResult<()>;
}
