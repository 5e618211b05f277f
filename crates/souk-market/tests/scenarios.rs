//! End-to-end search scenarios over the fixture catalog.

mod common;

use std::sync::Arc;
use std::time::Duration;

use souk_market::detect::{self, slug_for};
use souk_market::prelude::*;

use common::{ids, store, tree};

#[test]
fn detects_vehicles_from_toyota() {
    let store = store();
    let tree = tree(&store);

    let logical = detect::detect("toyota", Language::Fr);
    assert_eq!(logical, Some("vehicles"));

    let slug = logical.and_then(slug_for).unwrap();
    let category = tree.by_slug(slug).unwrap();
    let resolver = SchemaResolver::default();
    assert_eq!(
        resolver.resolve_category_type(&tree, &category.id),
        CategoryType::Vehicle
    );
    assert_eq!(
        resolver.resolve_brand_type(&tree, &category.id),
        Some(BrandType::Vehicles)
    );
}

#[tokio::test]
async fn toyota_search_uses_detected_category() {
    let store = store();
    let engine = common::engine(&store, EngineConfig::default());

    let outcome = engine
        .apply_filters(
            &tree(&store),
            &FilterRequest::new().with_text("toyota"),
            ReferenceNames::default(),
        )
        .await;

    assert!(outcome.detected);
    assert_eq!(
        outcome.category.as_ref().map(|c| c.category_type),
        Some(CategoryType::Vehicle)
    );
    // The pending Hilux is not part of the active superset.
    assert_eq!(ids(&outcome), vec!["l1"]);
}

#[tokio::test]
async fn empty_text_returns_full_active_superset() {
    let store = store();
    let engine = common::engine(&store, EngineConfig::default());

    assert_eq!(detect::detect("", Language::Fr), None);
    let outcome = engine
        .apply_filters(&tree(&store), &FilterRequest::new(), ReferenceNames::default())
        .await;

    assert!(outcome.category.is_none());
    assert!(!outcome.failed());
    assert_eq!(outcome.len(), 9);
    assert!(!ids(&outcome).contains(&"l3"));

    let queries = store.queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].category_id, None);
}

#[tokio::test]
async fn villa_with_minimum_surface() {
    let store = store();
    let session = common::session(&store, EngineConfig::default().with_debounce_ms(0));
    session.open().await;

    session.select_category("2").await;
    session.set_facet(FacetKey::PropertyType, "Villa").await;
    let outcome = session
        .set_facet(FacetKey::SurfaceMin, "100")
        .await
        .expect("latest request is accepted");

    assert_eq!(ids(&outcome), vec!["l4"]);
    assert_eq!(outcome.metrics.predicates, 2);
}

#[tokio::test]
async fn pool_flag_excludes_absent_and_false() {
    let store = store();
    let session = common::session(&store, EngineConfig::default().with_debounce_ms(0));
    session.open().await;
    session.select_category("2").await;

    let outcome = session.set_facet(FacetKey::HasPool, true).await.unwrap();
    assert_eq!(ids(&outcome), vec!["l4"]);
}

#[tokio::test(start_paused = true)]
async fn rapid_text_changes_issue_one_query() {
    let store = store();
    let session = Arc::new(common::session(&store, EngineConfig::default()));
    session.open().await;
    let before = store.queries().await.len();

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.set_search_text("vill").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = session.set_search_text("villa").await;

    assert!(first.await.unwrap().is_none());
    let outcome = second.expect("final text is searched");
    assert_eq!(ids(&outcome), vec!["l4", "l5"]);

    let queries = store.queries().await;
    assert_eq!(queries.len(), before + 1);
    assert_eq!(queries.last().map(|q| q.text.as_str()), Some("villa"));
}

#[tokio::test]
async fn rental_toggle_queries_rent_kind() {
    let store = store();
    let session = common::session(&store, EngineConfig::default().with_debounce_ms(0));
    session.open().await;
    session.select_category("3").await;
    assert_eq!(session.snapshot().await.toggle_mode(), ToggleMode::RentOnly);

    let outcome = session.set_toggle(ListingTypeToggle::ForRent).await.unwrap();
    assert_eq!(ids(&outcome), vec!["l7"]);
    assert_eq!(
        store.queries().await.last().and_then(|q| q.kind),
        Some(ListingKind::Rent)
    );
}

#[tokio::test]
async fn request_toggle_finds_wanted_listings() {
    let store = store();
    let session = common::session(&store, EngineConfig::default().with_debounce_ms(0));
    session.open().await;
    session.select_category("2").await;

    let outcome = session.set_toggle(ListingTypeToggle::Request).await.unwrap();
    assert_eq!(ids(&outcome), vec!["l10"]);
}

#[tokio::test]
async fn region_and_price_are_store_filters() {
    let store = store();
    let session = common::session(&store, EngineConfig::default().with_debounce_ms(0));
    session.open().await;
    session.select_category("1").await;

    session.set_facet(FacetKey::Region, "16").await;
    assert_eq!(session.snapshot().await.sub_regions.len(), 2);

    let outcome = session.set_facet(FacetKey::PriceMax, 2_000_000.0).await.unwrap();
    assert_eq!(ids(&outcome), vec!["l1"]);

    let query = store.queries().await.pop().unwrap();
    assert_eq!(query.region.as_deref(), Some("16"));
    assert_eq!(query.max_price, Some(2_000_000.0));
}
