//! Listing search command.

use std::sync::Arc;

use anyhow::Result;
use souk_market::catalog::CategoryTree;
use souk_market::search::{
    FilterEngine, FilterRequest, FilterState, ReferenceNames, SearchHistoryEntry, SearchOutcome,
};
use souk_market::store::SearchHistoryStore;

use super::{find_category, parse_filters, SearchArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = Arc::new(ctx.load_store(args.catalog.as_deref())?);
    let snapshot = store.snapshot();
    let tree = CategoryTree::new(snapshot.categories.clone());

    let mut request = FilterRequest::new()
        .with_text(args.text.join(" "))
        .with_toggle(args.toggle)
        .with_state(FilterState::from_params(parse_filters(&args.filters)?)?);
    if let Some(key) = &args.category {
        request = request.with_category(find_category(&tree, key)?.id.clone());
    }
    if let Some(key) = &args.subcategory {
        request = request.with_subcategory(find_category(&tree, key)?.id.clone());
    }
    if let Some(user) = &args.user {
        request = request.with_user(user.as_str());
    }
    if let Some(lang) = args.lang {
        request = request.with_language(lang);
    }

    let config = ctx.config.engine_config().with_detection(!args.no_detect);
    let record_history = config.record_history;
    let engine = FilterEngine::new(store.clone(), config);

    if args.sql {
        let active = engine.active_category(&tree, &request).map(|(c, _)| c);
        let (sql, params) = engine.build_query(&request, active.as_ref()).build_sql();
        ctx.output.header("Store query");
        ctx.output.kv("sql", &sql);
        ctx.output.kv("params", &params.join(", "));
    }

    let names = ReferenceNames::new(&snapshot.brands, &snapshot.models);
    let outcome = engine.apply_filters(&tree, &request, names).await;

    // The engine's history write is detached; the CLI records inline so the
    // write completes before the process exits.
    let recorded = match history_entry(&request, &outcome, record_history) {
        Some(entry) => store.record(entry).await.is_ok(),
        None => false,
    };

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    if let Some(error) = &outcome.error {
        ctx.output.error(&format!("Store query failed: {}", error));
    }

    if let Some(category) = &outcome.category {
        let name = tree
            .get(&category.category_id)
            .map(|c| c.display_name(ctx.config.search.language).to_string())
            .unwrap_or_else(|| category.category_id.to_string());
        let how = if outcome.detected { "detected" } else { "selected" };
        ctx.output.info(&format!(
            "Category: {} [{}] ({})",
            name, category.category_type, how
        ));
    }

    ctx.output.header(&format!("{} listing(s)", outcome.len()));
    for listing in outcome.listings.iter().take(args.limit) {
        let price = format_price(listing.price);
        ctx.output
            .table_row(&[listing.id.as_str(), price.as_str(), listing.title.as_str()], &[6, 16, 0]);
    }
    if outcome.len() > args.limit {
        ctx.output.info(&format!("… {} more", outcome.len() - args.limit));
    }

    let metrics = &outcome.metrics;
    ctx.output.debug(&format!(
        "candidates={} predicates={} phase_a={}µs phase_b={}µs",
        metrics.candidates, metrics.predicates, metrics.phase_a_us, metrics.phase_b_us
    ));
    if recorded {
        ctx.output.debug("Search recorded to history");
    }

    Ok(())
}

/// History record for a finished search: signed-in user, non-empty text and
/// a successful store query.
fn history_entry(
    request: &FilterRequest,
    outcome: &SearchOutcome,
    enabled: bool,
) -> Option<SearchHistoryEntry> {
    let user_id = request.user_id.as_ref()?;
    let text = request.text.trim();
    if !enabled || outcome.failed() || text.is_empty() {
        return None;
    }
    let entry = SearchHistoryEntry::new(user_id.clone(), text)
        .with_category(outcome.category.as_ref().map(|c| c.category_id.clone()))
        .with_filters(request.state.clone())
        .with_result_count(outcome.len());
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_for_signed_in_text_search() {
        let request = FilterRequest::new().with_text("  villa ").with_user("u1");
        let entry = history_entry(&request, &SearchOutcome::default(), true).unwrap();
        assert_eq!(entry.user_id.as_str(), "u1");
        assert_eq!(entry.query, "villa");
        assert_eq!(entry.result_count, 0);
    }

    #[test]
    fn test_history_entry_skipped() {
        let anonymous = FilterRequest::new().with_text("villa");
        assert!(history_entry(&anonymous, &SearchOutcome::default(), true).is_none());

        let blank = FilterRequest::new().with_text("  ").with_user("u1");
        assert!(history_entry(&blank, &SearchOutcome::default(), true).is_none());

        let request = FilterRequest::new().with_text("villa").with_user("u1");
        assert!(history_entry(&request, &SearchOutcome::default(), false).is_none());

        let failed = SearchOutcome {
            error: Some("offline".into()),
            ..SearchOutcome::default()
        };
        assert!(history_entry(&request, &failed, true).is_none());
    }
}
