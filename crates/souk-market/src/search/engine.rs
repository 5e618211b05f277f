//! The two-phase filter engine.
//!
//! Phase A sends the natively indexed fields to the listing store. Phase B
//! narrows the returned superset with the attribute predicates of the active
//! facet schema. A store failure yields an empty outcome with its `error`
//! set; nothing is returned as `Err`.

use std::sync::Arc;

use serde::Serialize;
use souk_observability::MetricsCollector;
use tracing::{debug, warn};

use crate::catalog::CategoryTree;
use crate::config::EngineConfig;
use crate::detect::CategoryDetector;
use crate::ids::{CategoryId, UserId};
use crate::locale::Language;
use crate::schema::{BrandType, CategoryType, SchemaResolver};
use crate::search::{
    FacetKey, FacetSchema, FilterState, ListingQuery, ListingTypeToggle, PredicateSet,
    ReferenceNames, SearchHistoryEntry, SearchOutcome,
};
use crate::store::{ListingStore, SearchHistoryStore};

/// A category in effect for one pass, with its resolved schema classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveCategory {
    pub category_id: CategoryId,
    pub subcategory_id: Option<CategoryId>,
    pub category_type: CategoryType,
    pub brand_type: Option<BrandType>,
}

impl ActiveCategory {
    /// Resolve a selection. A subcategory, when given, drives the schema.
    pub fn resolve(
        resolver: &SchemaResolver,
        tree: &CategoryTree,
        category_id: CategoryId,
        subcategory_id: Option<CategoryId>,
    ) -> Self {
        let effective = subcategory_id.as_ref().unwrap_or(&category_id);
        let category_type = resolver.resolve_category_type(tree, effective);
        let brand_type = resolver.resolve_brand_type(tree, effective);
        Self {
            category_id,
            subcategory_id,
            category_type,
            brand_type,
        }
    }

    pub fn schema(&self) -> FacetSchema {
        FacetSchema::for_category(Some(self.category_type), self.brand_type)
    }
}

/// Inputs of one filtering pass.
#[derive(Debug, Clone, Default)]
pub struct FilterRequest {
    pub state: FilterState,
    pub text: String,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<CategoryId>,
    pub toggle: ListingTypeToggle,
    /// Signed-in user; history is only recorded when set.
    pub user_id: Option<UserId>,
    /// Detection language; the engine default when unset.
    pub language: Option<Language>,
    /// Generation stamped on the outcome.
    pub generation: u64,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: FilterState) -> Self {
        self.state = state;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn with_subcategory(mut self, id: impl Into<CategoryId>) -> Self {
        self.subcategory_id = Some(id.into());
        self
    }

    pub fn with_toggle(mut self, toggle: ListingTypeToggle) -> Self {
        self.toggle = toggle;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

/// Runs filtering passes against a listing store.
pub struct FilterEngine {
    store: Arc<dyn ListingStore>,
    history: Option<Arc<dyn SearchHistoryStore>>,
    resolver: SchemaResolver,
    detector: CategoryDetector,
    config: EngineConfig,
}

impl FilterEngine {
    pub fn new(store: Arc<dyn ListingStore>, config: EngineConfig) -> Self {
        Self {
            store,
            history: None,
            resolver: SchemaResolver::default(),
            detector: CategoryDetector::new(config.detector),
            config,
        }
    }

    /// Record text searches of signed-in users to `history`.
    pub fn with_history(mut self, history: Arc<dyn SearchHistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_resolver(mut self, resolver: SchemaResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    pub fn detector(&self) -> &CategoryDetector {
        &self.detector
    }

    /// Category detected from free text in `lang`, if its slug exists in the
    /// tree.
    pub fn infer_category(
        &self,
        tree: &CategoryTree,
        text: &str,
        lang: Language,
    ) -> Option<ActiveCategory> {
        let slug = self.detector.detect_slug(text, lang)?;
        let Some(category) = tree.by_slug(slug) else {
            debug!(slug, "detected category missing from tree");
            return None;
        };
        Some(ActiveCategory::resolve(
            &self.resolver,
            tree,
            category.id.clone(),
            None,
        ))
    }

    /// Category a request filters by: the selection, else detection from the
    /// text when enabled. The flag reports whether it was detected.
    pub fn active_category(
        &self,
        tree: &CategoryTree,
        request: &FilterRequest,
    ) -> Option<(ActiveCategory, bool)> {
        if let Some(category_id) = &request.category_id {
            let active = ActiveCategory::resolve(
                &self.resolver,
                tree,
                category_id.clone(),
                request.subcategory_id.clone(),
            );
            return Some((active, false));
        }
        if !self.config.detect_category {
            return None;
        }
        let lang = request.language.unwrap_or(self.config.language);
        self.infer_category(tree, &request.text, lang)
            .map(|active| (active, true))
    }

    /// Phase A query for a request under an optional active category.
    pub fn build_query(
        &self,
        request: &FilterRequest,
        category: Option<&ActiveCategory>,
    ) -> ListingQuery {
        let state = &request.state;
        let schema = category.map(ActiveCategory::schema);
        let mode = schema
            .as_ref()
            .map(FacetSchema::toggle_mode)
            .unwrap_or_else(|| FacetSchema::uncategorized().toggle_mode());

        let mut query = ListingQuery::new()
            .with_text(request.text.as_str())
            .with_kind(request.toggle.to_store_kind(mode))
            .with_price_range(
                state.active(FacetKey::PriceMin).and_then(|v| v.as_number()),
                state.active(FacetKey::PriceMax).and_then(|v| v.as_number()),
            );

        if let Some(category) = category {
            query.category_id = Some(category.category_id.clone());
            query.subcategory_id = category.subcategory_id.clone();
        }
        if let Some(region) = state.active(FacetKey::Region) {
            query = query.with_region(region.as_text().into_owned());
        }
        if let Some(sub_region) = state.active(FacetKey::SubRegion) {
            query = query.with_sub_region(sub_region.as_text().into_owned());
        }
        query
    }

    /// Run one filtering pass.
    pub async fn apply_filters(
        &self,
        tree: &CategoryTree,
        request: &FilterRequest,
        names: ReferenceNames<'_>,
    ) -> SearchOutcome {
        let mut collector = MetricsCollector::start();
        let active = self.active_category(tree, request);
        let (category, detected) = match active {
            Some((category, detected)) => (Some(category), detected),
            None => (None, false),
        };

        let query = self.build_query(request, category.as_ref());
        let mut listings = match self.store.query_listings(&query).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!(error = %e, generation = request.generation, "Listing query failed");
                collector.record_failure(e.to_string());
                let metrics = collector.finish();
                metrics.log();
                return SearchOutcome {
                    listings: Vec::new(),
                    category,
                    detected,
                    error: Some(e.to_string()),
                    generation: request.generation,
                    metrics,
                };
            }
        };
        collector.record_phase_a(listings.len());

        let schema = category
            .as_ref()
            .map(ActiveCategory::schema)
            .unwrap_or_else(FacetSchema::uncategorized);
        let predicates = PredicateSet::compile(&request.state, &schema, names);
        predicates.apply(&mut listings);
        collector.record_phase_b(predicates.len(), listings.len());

        let metrics = collector.finish();
        metrics.log();

        self.record_history(request, category.as_ref(), listings.len());

        SearchOutcome {
            listings,
            category,
            detected,
            error: None,
            generation: request.generation,
            metrics,
        }
    }

    fn record_history(
        &self,
        request: &FilterRequest,
        category: Option<&ActiveCategory>,
        result_count: usize,
    ) {
        if !self.config.record_history {
            return;
        }
        let (Some(history), Some(user_id)) = (&self.history, &request.user_id) else {
            return;
        };
        let text = request.text.trim();
        if text.is_empty() {
            return;
        }

        let entry = SearchHistoryEntry::new(user_id.clone(), text)
            .with_category(category.map(|c| c.category_id.clone()))
            .with_filters(request.state.clone())
            .with_result_count(result_count);
        let history = Arc::clone(history);
        tokio::spawn(async move {
            if let Err(e) = history.record(entry).await {
                warn!(error = %e, "Failed to record search history");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::listing::{Attributes, Listing, ListingKind, ListingLocation};
    use crate::locale::LocalizedText;
    use crate::store::{CatalogSnapshot, MemoryStore};

    fn tree() -> CategoryTree {
        let vehicles = Category::new_root("1", "vehicules", LocalizedText::default());
        let cars = Category::new_child(&vehicles, "11", "voitures", LocalizedText::default());
        let rentals = Category::new_root("3", "location-immobiliere", LocalizedText::default());
        CategoryTree::new(vec![vehicles, cars, rentals])
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new(CatalogSnapshot {
            listings: vec![
                Listing::new("1", "Toyota Yaris", "1")
                    .with_price(1_500_000.0)
                    .with_attributes(Attributes::new().with("fuel", "Essence")),
                Listing::new("2", "Toyota Hilux", "1")
                    .with_price(4_000_000.0)
                    .with_attributes(Attributes::new().with("fuel", "Diesel")),
                Listing::new("3", "F3 Hydra", "3")
                    .with_kind(ListingKind::Rent)
                    .with_location(ListingLocation::new("alger", None)),
            ],
            ..CatalogSnapshot::default()
        }))
    }

    fn engine(store: Arc<MemoryStore>) -> FilterEngine {
        FilterEngine::new(store, EngineConfig::default())
    }

    #[test]
    fn test_subcategory_drives_schema() {
        let engine = engine(store());
        let active = ActiveCategory::resolve(
            engine.resolver(),
            &tree(),
            CategoryId::new("1"),
            Some(CategoryId::new("11")),
        );
        assert_eq!(active.category_type, CategoryType::Vehicle);
        assert_eq!(active.brand_type, Some(BrandType::Vehicles));
    }

    #[test]
    fn test_rental_toggle_maps_to_rent() {
        let engine = engine(store());
        let request = FilterRequest::new()
            .with_category("3")
            .with_toggle(ListingTypeToggle::ForRent);
        let (active, detected) = engine.active_category(&tree(), &request).unwrap();
        assert!(!detected);

        let query = engine.build_query(&request, Some(&active));
        assert_eq!(query.kind, Some(ListingKind::Rent));
        assert_eq!(query.category_id, Some(CategoryId::new("3")));
    }

    #[test]
    fn test_offer_toggle_ignored_in_rent_mode() {
        let engine = engine(store());
        let request = FilterRequest::new()
            .with_category("3")
            .with_toggle(ListingTypeToggle::Offer);
        let (active, _) = engine.active_category(&tree(), &request).unwrap();
        assert_eq!(engine.build_query(&request, Some(&active)).kind, None);
    }

    #[tokio::test]
    async fn test_detected_category_filters() {
        let store = store();
        let engine = engine(store.clone());
        let request = FilterRequest::new().with_text("toyota");

        let outcome = engine
            .apply_filters(&tree(), &request, ReferenceNames::default())
            .await;

        assert!(outcome.detected);
        let category = outcome.category.unwrap();
        assert_eq!(category.category_type, CategoryType::Vehicle);
        assert_eq!(outcome.listings.len(), 2);
        assert_eq!(store.queries().await[0].category_id, Some(CategoryId::new("1")));
    }

    #[test]
    fn test_request_language_overrides_default() {
        let engine = engine(store());
        let request = FilterRequest::new().with_text("سيارة");
        assert!(engine.active_category(&tree(), &request).is_none());

        let request = request.with_language(Language::Ar);
        let (active, detected) = engine.active_category(&tree(), &request).unwrap();
        assert!(detected);
        assert_eq!(active.category_id, CategoryId::new("1"));
    }

    #[tokio::test]
    async fn test_detection_can_be_disabled() {
        let engine = FilterEngine::new(store(), EngineConfig::default().with_detection(false));
        let request = FilterRequest::new().with_text("toyota");
        let outcome = engine
            .apply_filters(&tree(), &request, ReferenceNames::default())
            .await;
        assert!(outcome.category.is_none());
        assert_eq!(outcome.len(), 2);
    }

    #[tokio::test]
    async fn test_phase_b_narrows_and_counts() {
        let engine = engine(store());
        let request = FilterRequest::new()
            .with_category("1")
            .with_state(FilterState::new().with(FacetKey::Fuel, "diesel"))
            .with_generation(7);

        let outcome = engine
            .apply_filters(&tree(), &request, ReferenceNames::default())
            .await;

        assert_eq!(outcome.generation, 7);
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.listings[0].id.as_str(), "2");
        assert_eq!(outcome.metrics.candidates, 2);
        assert_eq!(outcome.metrics.predicates, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_flagged() {
        let store = store();
        store.set_fail_queries(true);
        let engine = engine(store);

        let outcome = engine
            .apply_filters(&tree(), &FilterRequest::new(), ReferenceNames::default())
            .await;

        assert!(outcome.failed());
        assert!(outcome.is_empty());
        assert!(outcome.metrics.failed);
    }
}
