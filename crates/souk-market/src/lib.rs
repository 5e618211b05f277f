//! Category detection and facet filtering for Souk classifieds.
//!
//! This crate provides the search core behind the listing browser:
//!
//! - **Detect**: infer a category from free text in French, English or Arabic
//! - **Schema**: resolve a category to its facet schema and brand list
//! - **Search**: two-phase filtering (store query, then attribute predicates),
//!   debounced panel sessions and search history
//! - **Store**: async contracts for listing, reference and history backends,
//!   with an in-memory implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use souk_market::prelude::*;
//!
//! let store = Arc::new(MemoryStore::from_json_str(&catalog_json)?);
//! let engine = Arc::new(FilterEngine::new(store.clone(), EngineConfig::default()));
//! let session = FilterSession::new(engine, store).with_user("u1");
//!
//! session.open().await;
//! session.select_category("2").await;
//! session.set_facet(FacetKey::PropertyType, "Villa").await;
//! if let Some(outcome) = session.set_facet(FacetKey::SurfaceMin, 100.0).await {
//!     println!("{} listings", outcome.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod locale;

pub mod catalog;
pub mod detect;
pub mod listing;
pub mod schema;
pub mod search;
pub mod store;

pub use config::EngineConfig;
pub use error::{MarketError, StoreError};
pub use ids::*;
pub use locale::{Language, LocalizedText};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{MarketError, StoreError};
    pub use crate::ids::*;
    pub use crate::locale::{Language, LocalizedText};

    // Catalog
    pub use crate::catalog::{Brand, Category, CategoryTree, Model, Region, SubRegion};

    // Listings
    pub use crate::listing::{
        Attributes, Listing, ListingKind, ListingLocation, ListingStatus, PriceType,
    };

    // Detection and schema
    pub use crate::detect::{CategoryDetector, DetectorConfig};
    pub use crate::schema::{BrandType, CategoryType, SchemaResolver};

    // Search
    pub use crate::search::{
        ActiveCategory, FacetKey, FacetSchema, FacetValue, FilterEngine, FilterRequest,
        FilterSession, FilterState, ListingQuery, ListingTypeToggle, ReferenceNames,
        SearchHistoryEntry, SearchOutcome, ToggleMode,
    };

    // Stores
    pub use crate::store::{
        CatalogSnapshot, ListingStore, MemoryStore, ReferenceStore, SearchHistoryStore,
    };
}
