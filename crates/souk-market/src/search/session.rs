//! Stateful facet panel over a [`FilterEngine`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{Brand, Category, CategoryTree, Model, Region, SubRegion};
use crate::ids::{BrandId, CategoryId, UserId};
use crate::locale::Language;
use crate::schema::BrandType;
use crate::search::{
    ActiveCategory, Debouncer, FacetKey, FacetSchema, FacetValue, FilterEngine, FilterRequest,
    FilterState, ListingTypeToggle, ReferenceNames, SearchOutcome, ToggleMode,
};
use crate::store::{ReferenceStore, StoreResult};

/// Invoked with the selected category id, or `""` when the selection clears.
pub type CategoryCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Everything the panel shows.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub tree: Arc<CategoryTree>,
    pub regions: Vec<Region>,
    pub sub_regions: Vec<SubRegion>,
    /// Children of the selected category.
    pub subcategories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub models: Vec<Model>,
    pub category: Option<ActiveCategory>,
    pub filters: FilterState,
    pub text: String,
    pub toggle: ListingTypeToggle,
    /// Latest accepted outcome.
    pub outcome: SearchOutcome,
    /// Bumped on every category or subcategory change. Reference lists
    /// loaded under an older value are dropped.
    selection: u64,
}

impl PanelState {
    pub fn schema(&self) -> FacetSchema {
        self.category
            .as_ref()
            .map(ActiveCategory::schema)
            .unwrap_or_else(FacetSchema::uncategorized)
    }

    pub fn toggle_mode(&self) -> ToggleMode {
        self.schema().toggle_mode()
    }

    fn request(
        &self,
        user_id: Option<&UserId>,
        language: Option<Language>,
        generation: u64,
    ) -> FilterRequest {
        FilterRequest {
            state: self.filters.clone(),
            text: self.text.clone(),
            category_id: self.category.as_ref().map(|c| c.category_id.clone()),
            subcategory_id: self.category.as_ref().and_then(|c| c.subcategory_id.clone()),
            toggle: self.toggle,
            user_id: user_id.cloned(),
            language,
            generation,
        }
    }

    fn begin_selection(&mut self) -> u64 {
        self.selection += 1;
        self.selection
    }

    /// Whether a list loaded for `key = value` under `selection` still applies.
    fn facet_current(&self, selection: u64, key: FacetKey, value: &str) -> bool {
        self.selection == selection
            && self
                .filters
                .get(key)
                .is_some_and(|v| v.as_text() == value)
    }

    fn clear_category(&mut self) {
        self.category = None;
        self.subcategories.clear();
        self.brands.clear();
        self.models.clear();
    }
}

/// One user's facet panel.
///
/// Text and facet changes are debounced; every refresh takes a new generation
/// and an outcome is only accepted while its generation is the latest.
pub struct FilterSession {
    engine: Arc<FilterEngine>,
    reference: Arc<dyn ReferenceStore>,
    panel: Mutex<PanelState>,
    generations: Debouncer,
    user_id: Option<UserId>,
    language: Option<Language>,
    on_category_change: Option<CategoryCallback>,
}

impl FilterSession {
    pub fn new(engine: Arc<FilterEngine>, reference: Arc<dyn ReferenceStore>) -> Self {
        let generations = Debouncer::new(engine.config().debounce());
        Self {
            engine,
            reference,
            panel: Mutex::new(PanelState::default()),
            generations,
            user_id: None,
            language: None,
            on_category_change: None,
        }
    }

    /// Signed-in user whose text searches are recorded.
    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Detect categories in `language` instead of the engine default.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Seed the facet selections, typically from navigation parameters,
    /// before [`open`](Self::open).
    pub fn with_initial_filters(mut self, filters: FilterState) -> Self {
        self.panel.get_mut().filters = filters;
        self
    }

    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.panel.get_mut().text = text.into();
        self
    }

    pub fn on_category_change(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_category_change = Some(Arc::new(callback));
        self
    }

    /// Load the category tree and regions, then run the initial search.
    pub async fn open(&self) -> Option<SearchOutcome> {
        let categories = degrade(self.reference.categories().await, "categories");
        let regions = degrade(self.reference.regions().await, "regions");
        {
            let mut panel = self.panel.lock().await;
            panel.tree = Arc::new(CategoryTree::new(categories));
            panel.regions = regions;
        }
        info!("Filter session opened");
        self.refresh().await
    }

    /// Select a top-level category. Selecting the current one again clears it.
    pub async fn select_category(&self, id: impl Into<CategoryId>) -> Option<SearchOutcome> {
        let id = id.into();

        let (tree, brand_type, selected, selection) = {
            let mut panel = self.panel.lock().await;
            let selection = panel.begin_selection();
            panel.filters.clear();
            panel.models.clear();
            panel.sub_regions.clear();

            let same = panel
                .category
                .as_ref()
                .map_or(false, |c| c.category_id == id);
            if same {
                panel.clear_category();
                (Arc::clone(&panel.tree), None, None, selection)
            } else {
                let active = ActiveCategory::resolve(self.engine.resolver(), &panel.tree, id.clone(), None);
                let brand_type = active.brand_type;
                panel.subcategories = panel.tree.children(&id).into_iter().cloned().collect();
                panel.brands.clear();
                panel.category = Some(active);
                (Arc::clone(&panel.tree), brand_type, Some(id), selection)
            }
        };

        match &selected {
            Some(id) => {
                debug!(category = %id, subcategories = tree.children(id).len(), "Category selected");
                self.notify_category(id.as_str());
                let brands = self.load_brands(brand_type).await;
                let mut panel = self.panel.lock().await;
                if panel.selection == selection {
                    panel.brands = brands;
                } else {
                    debug!(category = %id, "Dropping brands of a superseded selection");
                }
            }
            None => {
                debug!("Category cleared");
                self.notify_category("");
            }
        }

        self.refresh().await
    }

    /// Narrow to a subcategory of the selected category, or back out with `None`.
    ///
    /// Filters survive only while the category type and brand type stay the
    /// same; otherwise the panel resets as on a category change.
    pub async fn select_subcategory(&self, id: Option<CategoryId>) -> Option<SearchOutcome> {
        let (reload_brands, brand_type, selection) = {
            let mut panel = self.panel.lock().await;
            let Some(current) = panel.category.clone() else {
                debug!("Subcategory ignored without a category");
                return None;
            };
            let selection = panel.begin_selection();
            let active = ActiveCategory::resolve(
                self.engine.resolver(),
                &panel.tree,
                current.category_id.clone(),
                id,
            );
            let reload_brands = active.brand_type != current.brand_type;
            if reload_brands || active.category_type != current.category_type {
                debug!(
                    from = %current.category_type,
                    to = %active.category_type,
                    "Schema changed, resetting filters"
                );
                panel.filters.clear();
                panel.models.clear();
                panel.sub_regions.clear();
            }
            if reload_brands {
                panel.brands.clear();
            }
            let brand_type = active.brand_type;
            panel.category = Some(active);
            (reload_brands, brand_type, selection)
        };

        if reload_brands {
            let brands = self.load_brands(brand_type).await;
            let mut panel = self.panel.lock().await;
            if panel.selection == selection {
                panel.brands = brands;
            } else {
                debug!("Dropping brands of a superseded subcategory");
            }
        }

        self.refresh().await
    }

    /// Set one facet and schedule a search.
    ///
    /// An inactive value removes the facet. A brand change reloads models and
    /// clears the model; a region change reloads sub-regions and clears the
    /// sub-region.
    pub async fn set_facet(&self, key: FacetKey, value: impl Into<FacetValue>) -> Option<SearchOutcome> {
        let value = value.into();
        let active = value.is_active();
        let text = value.as_text().into_owned();

        let selection = {
            let mut panel = self.panel.lock().await;
            if active {
                panel.filters.set(key, value);
            } else {
                panel.filters.remove(key);
            }
            match key {
                FacetKey::Brand => {
                    panel.filters.remove(FacetKey::Model);
                    panel.models.clear();
                }
                FacetKey::Region => {
                    panel.filters.remove(FacetKey::SubRegion);
                    panel.sub_regions.clear();
                }
                _ => {}
            }
            panel.selection
        };

        if active {
            match key {
                FacetKey::Brand => {
                    let brand_id = BrandId::new(text.as_str());
                    let models = degrade(self.reference.models(&brand_id).await, "models");
                    let mut panel = self.panel.lock().await;
                    if panel.facet_current(selection, key, &text) {
                        panel.models = models;
                    } else {
                        debug!(brand = %brand_id, "Dropping models of a superseded brand");
                    }
                }
                FacetKey::Region => {
                    let sub_regions = degrade(self.reference.sub_regions(&text).await, "sub-regions");
                    let mut panel = self.panel.lock().await;
                    if panel.facet_current(selection, key, &text) {
                        panel.sub_regions = sub_regions;
                    } else {
                        debug!(region = %text, "Dropping sub-regions of a superseded region");
                    }
                }
                _ => {}
            }
        }

        self.schedule_refresh().await
    }

    pub async fn clear_facet(&self, key: FacetKey) -> Option<SearchOutcome> {
        self.set_facet(key, FacetValue::Flag(false)).await
    }

    /// Update the free text and schedule a search.
    pub async fn set_search_text(&self, text: impl Into<String>) -> Option<SearchOutcome> {
        self.panel.lock().await.text = text.into();
        self.schedule_refresh().await
    }

    pub async fn set_toggle(&self, toggle: ListingTypeToggle) -> Option<SearchOutcome> {
        self.panel.lock().await.toggle = toggle;
        self.refresh().await
    }

    /// Clear every facet; the category and text stay.
    pub async fn reset_filters(&self) -> Option<SearchOutcome> {
        {
            let mut panel = self.panel.lock().await;
            panel.filters.clear();
            panel.models.clear();
            panel.sub_regions.clear();
            panel.toggle = ListingTypeToggle::Any;
        }
        self.refresh().await
    }

    /// Wait out the quiet period, then refresh unless a newer change arrived.
    async fn schedule_refresh(&self) -> Option<SearchOutcome> {
        let ticket = self.generations.issue();
        if !self.generations.settle(&ticket).await {
            debug!(generation = ticket.generation(), "Superseded before settling");
            return None;
        }
        self.refresh().await
    }

    /// Search now. Returns `None` when a newer request superseded this one.
    pub async fn refresh(&self) -> Option<SearchOutcome> {
        let ticket = self.generations.issue();
        let (tree, request, brands, models) = {
            let panel = self.panel.lock().await;
            (
                Arc::clone(&panel.tree),
                panel.request(self.user_id.as_ref(), self.language, ticket.generation()),
                panel.brands.clone(),
                panel.models.clone(),
            )
        };

        let outcome = self
            .engine
            .apply_filters(&tree, &request, ReferenceNames::new(&brands, &models))
            .await;

        let mut panel = self.panel.lock().await;
        if !self.generations.is_current(&ticket) {
            debug!(
                generation = ticket.generation(),
                latest = self.generations.latest(),
                "Discarding stale response"
            );
            return None;
        }
        panel.outcome = outcome.clone();
        Some(outcome)
    }

    pub async fn snapshot(&self) -> PanelState {
        self.panel.lock().await.clone()
    }

    pub async fn filters(&self) -> FilterState {
        self.panel.lock().await.filters.clone()
    }

    pub async fn outcome(&self) -> SearchOutcome {
        self.panel.lock().await.outcome.clone()
    }

    pub async fn category(&self) -> Option<ActiveCategory> {
        self.panel.lock().await.category.clone()
    }

    pub async fn schema(&self) -> FacetSchema {
        self.panel.lock().await.schema()
    }

    async fn load_brands(&self, brand_type: Option<BrandType>) -> Vec<Brand> {
        match brand_type {
            Some(bt) => degrade(self.reference.brands(bt).await, "brands"),
            None => Vec::new(),
        }
    }

    fn notify_category(&self, id: &str) {
        if let Some(callback) = &self.on_category_change {
            callback(id);
        }
    }
}

/// Reference reads degrade to an empty list.
fn degrade<T>(result: StoreResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, list = what, "Failed to load reference data");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::listing::{Attributes, Listing};
    use crate::locale::LocalizedText;
    use crate::store::{CatalogSnapshot, MemoryStore};
    use std::sync::Mutex as StdMutex;

    fn store() -> Arc<MemoryStore> {
        let vehicles = Category::new_root("1", "vehicules", LocalizedText::default());
        let cars = Category::new_child(&vehicles, "11", "voitures", LocalizedText::default());
        let animals = Category::new_root("7", "animaux", LocalizedText::default());
        Arc::new(MemoryStore::new(CatalogSnapshot {
            categories: vec![vehicles, cars, animals],
            brands: vec![Brand::new("b1", "Toyota", BrandType::Vehicles)],
            models: vec![Model::new("m1", "b1", "Yaris")],
            listings: vec![
                Listing::new("1", "Yaris", "1").with_attributes(
                    Attributes::new().with("brand_name", "Toyota").with("fuel", "Essence"),
                ),
                Listing::new("2", "Clio", "1").with_attributes(Attributes::new().with("fuel", "Diesel")),
                Listing::new("3", "Chiot", "7"),
            ],
            ..CatalogSnapshot::default()
        }))
    }

    fn session(store: Arc<MemoryStore>) -> FilterSession {
        let engine = Arc::new(FilterEngine::new(
            store.clone(),
            EngineConfig::default().with_debounce_ms(0),
        ));
        FilterSession::new(engine, store)
    }

    #[tokio::test]
    async fn test_open_loads_tree_and_searches() {
        let session = session(store());
        let outcome = session.open().await.unwrap();
        assert_eq!(outcome.len(), 3);
        assert_eq!(session.snapshot().await.tree.len(), 3);
    }

    #[tokio::test]
    async fn test_open_degrades_on_reference_failure() {
        let store = store();
        store.set_fail_reference(true);
        let session = session(store);
        let outcome = session.open().await.unwrap();
        assert!(session.snapshot().await.tree.is_empty());
        assert_eq!(outcome.len(), 3);
    }

    #[tokio::test]
    async fn test_category_change_resets_filters() {
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let session = session(store())
            .on_category_change(move |id| seen.lock().unwrap().push(id.to_string()));
        session.open().await;

        session.select_category("1").await;
        session.set_facet(FacetKey::Fuel, "diesel").await;
        assert_eq!(session.filters().await.len(), 1);
        let panel = session.snapshot().await;
        assert_eq!(panel.subcategories.len(), 1);
        assert_eq!(panel.brands.len(), 1);
        assert_eq!(panel.outcome.len(), 1);

        session.select_category("7").await;
        assert!(session.filters().await.is_empty());
        let panel = session.snapshot().await;
        assert!(panel.brands.is_empty());
        assert_eq!(panel.outcome.len(), 1);

        session.select_category("7").await;
        assert!(session.category().await.is_none());
        assert_eq!(session.outcome().await.len(), 3);

        assert_eq!(*calls.lock().unwrap(), vec!["1", "7", ""]);
    }

    #[tokio::test]
    async fn test_brand_loads_models_and_clears_model() {
        let session = session(store());
        session.open().await;
        session.select_category("1").await;

        session.set_facet(FacetKey::Model, "m1").await;
        session.set_facet(FacetKey::Brand, "b1").await;

        let panel = session.snapshot().await;
        assert!(panel.filters.get(FacetKey::Model).is_none());
        assert_eq!(panel.models.len(), 1);
        assert_eq!(panel.outcome.len(), 1);
        assert_eq!(panel.outcome.listings[0].id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_seeded_filters_apply_on_open() {
        let seeded = FilterState::from_params([("fuel", "Diesel"), ("utm_source", "mail")]).unwrap();
        let session = session(store())
            .with_initial_filters(seeded)
            .with_initial_text("clio");
        let outcome = session.open().await.unwrap();

        // No category is selected, so the vehicle facet stays inert.
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.metrics.predicates, 0);
        assert_eq!(session.filters().await.len(), 1);
    }

    #[tokio::test]
    async fn test_subcategory_without_category_is_ignored() {
        let session = session(store());
        session.open().await;
        assert!(session.select_subcategory(Some(CategoryId::new("11"))).await.is_none());
    }
}
