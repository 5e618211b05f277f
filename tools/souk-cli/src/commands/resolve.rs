//! Category schema resolution command.

use anyhow::Result;
use serde::Serialize;
use souk_market::catalog::CategoryTree;
use souk_market::schema::{BrandType, CategoryType, SchemaResolver, SlugPath};
use souk_market::search::{FacetKey, FacetSchema, ToggleMode};
use souk_market::store::ReferenceStore;

use super::{find_category, ResolveArgs};
use crate::context::Context;

#[derive(Serialize)]
struct ResolveReport<'a> {
    id: &'a str,
    slug: &'a str,
    path: String,
    category_type: CategoryType,
    brand_type: Option<BrandType>,
    toggle: ToggleMode,
    facets: Vec<&'static str>,
    subcategories: Vec<&'a str>,
    brands: Vec<String>,
}

/// Run the resolve command.
pub async fn run(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let language = args.lang.unwrap_or(ctx.config.search.language);
    let store = ctx.load_store(args.catalog.as_deref())?;
    let tree = CategoryTree::new(store.snapshot().categories.clone());
    let category = find_category(&tree, &args.category)?;

    let resolver = SchemaResolver::default();
    let path = SlugPath::of(&tree, category);
    let category_type = resolver.category_type_of(&path);
    let brand_type = resolver.brand_type_of(&path);
    let schema = FacetSchema::for_category(Some(category_type), brand_type);

    let brands: Vec<String> = match brand_type {
        Some(bt) => store.brands(bt).await?.into_iter().map(|b| b.name).collect(),
        None => Vec::new(),
    };
    let children = tree.children(&category.id);

    if ctx.output.is_json() {
        ctx.output.json(&ResolveReport {
            id: category.id.as_str(),
            slug: &category.slug,
            path: path.joined(),
            category_type,
            brand_type,
            toggle: schema.toggle_mode(),
            facets: schema.keys().iter().map(FacetKey::as_str).collect(),
            subcategories: children.iter().map(|c| c.slug.as_str()).collect(),
            brands,
        });
        return Ok(());
    }

    ctx.output.header(category.display_name(language));
    ctx.output.kv("id", category.id.as_str());
    ctx.output.kv("path", &path.joined());
    ctx.output.kv("category type", category_type.as_str());
    ctx.output.kv(
        "brand type",
        brand_type.map(|b| b.as_str()).unwrap_or("none"),
    );
    let toggle: Vec<&str> = schema
        .toggle_mode()
        .options()
        .iter()
        .map(|t| t.label(language))
        .collect();
    ctx.output.kv("listing type", &toggle.join(" / "));

    ctx.output.header("Facets");
    for key in schema.keys() {
        ctx.output.list_item(key.as_str());
    }

    if !children.is_empty() {
        ctx.output.header("Subcategories");
        for child in &children {
            ctx.output
                .list_item(&format!("{} ({})", child.display_name(language), child.slug));
        }
    }

    if !brands.is_empty() {
        ctx.output.header("Brands");
        for brand in &brands {
            ctx.output.list_item(brand);
        }
    }

    Ok(())
}
