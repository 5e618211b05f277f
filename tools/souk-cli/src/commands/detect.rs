//! Category detection command.

use anyhow::Result;
use serde::Serialize;
use souk_market::catalog::CategoryTree;
use souk_market::detect::{slug_for, CategoryDetector, CategoryScore};
use souk_market::schema::{CategoryType, SchemaResolver};
use souk_market::Language;

use super::DetectArgs;
use crate::context::Context;
use crate::output::score_badge;

#[derive(Serialize)]
struct DetectReport<'a> {
    query: &'a str,
    language: Language,
    category: Option<&'static str>,
    slug: Option<&'static str>,
    category_id: Option<String>,
    category_type: Option<CategoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<CategoryScore>>,
}

/// Run the detect command.
pub async fn run(args: DetectArgs, ctx: &Context) -> Result<()> {
    let language = args.lang.unwrap_or(ctx.config.search.language);
    let detector = CategoryDetector::new(ctx.config.engine_config().detector);
    let query = args.query.join(" ");

    let category = detector.detect(&query, language);
    let slug = category.and_then(slug_for);

    // Mapping to a catalog category is best effort.
    let tree = match ctx.load_store(args.catalog.as_deref()) {
        Ok(store) => Some(CategoryTree::new(store.snapshot().categories.clone())),
        Err(e) => {
            ctx.output.debug(&format!("No catalog: {:#}", e));
            None
        }
    };
    let matched = tree
        .as_ref()
        .zip(slug)
        .and_then(|(tree, slug)| tree.by_slug(slug).map(|c| (tree, c)));
    let category_type = matched.map(|(tree, c)| SchemaResolver::default().resolve_category_type(tree, &c.id));

    let scores = args.explain.then(|| detector.scores(&query, language));

    if ctx.output.is_json() {
        ctx.output.json(&DetectReport {
            query: &query,
            language,
            category,
            slug,
            category_id: matched.map(|(_, c)| c.id.to_string()),
            category_type,
            scores,
        });
        return Ok(());
    }

    match category {
        Some(id) => ctx.output.success(&format!("Detected: {}", id)),
        None => ctx.output.warn("No category detected"),
    }
    if let Some(slug) = slug {
        ctx.output.kv("slug", slug);
    }
    if let Some((_, c)) = matched {
        ctx.output.kv("category", &format!("{} ({})", c.display_name(language), c.id));
    }
    if let Some(category_type) = category_type {
        ctx.output.kv("category type", category_type.as_str());
    }

    if let Some(scores) = scores {
        let threshold = detector.config().min_score;
        ctx.output.header(&format!("Scores (threshold {})", threshold));
        for score in &scores {
            let badge = score_badge(score.score, threshold);
            ctx.output.table_row(&[score.id, badge.as_str()], &[14, 4]);
        }
    }

    Ok(())
}
