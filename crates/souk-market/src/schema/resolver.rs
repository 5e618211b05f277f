//! Ordered slug resolution strategies.
//!
//! Category type and brand type share the same three-step algorithm: exact
//! slug, then parent slug, then prioritized keyword rules over the combined
//! path. Only the tables differ, so both are a [`Resolver`] over a list of
//! [`Strategy`] values tried in order.

use std::collections::HashMap;

use crate::catalog::{Category, CategoryTree};
use crate::ids::CategoryId;
use crate::schema::{tables, BrandType, CategoryType};

/// The slugs a resolution looks at.
#[derive(Debug, Clone, Copy)]
pub struct SlugPath<'a> {
    pub slug: &'a str,
    pub parent_slug: Option<&'a str>,
}

impl<'a> SlugPath<'a> {
    pub fn new(slug: &'a str, parent_slug: Option<&'a str>) -> Self {
        Self { slug, parent_slug }
    }

    /// Build from a category and its tree.
    pub fn of(tree: &'a CategoryTree, category: &'a Category) -> Self {
        Self {
            slug: &category.slug,
            parent_slug: tree.parent_of(category).map(|p| p.slug.as_str()),
        }
    }

    /// Parent and own slug joined as a path, used by keyword rules.
    pub fn joined(&self) -> String {
        match self.parent_slug {
            Some(parent) => format!("{}/{}", parent, self.slug),
            None => self.slug.to_string(),
        }
    }
}

/// A substring rule. Higher priority rules are tested first.
#[derive(Debug, Clone)]
pub struct KeywordRule<T> {
    pub priority: u8,
    pub needles: &'static [&'static str],
    pub value: T,
}

impl<T: Copy> KeywordRule<T> {
    pub const fn new(priority: u8, needles: &'static [&'static str], value: T) -> Self {
        Self {
            priority,
            needles,
            value,
        }
    }

    fn matches(&self, haystack: &str) -> bool {
        self.needles.iter().any(|n| haystack.contains(n))
    }
}

/// One step of a resolution.
#[derive(Debug, Clone)]
pub enum Strategy<T> {
    /// Exact lookup of the category's own slug.
    OwnSlug(HashMap<&'static str, T>),
    /// Exact lookup of the parent's slug.
    ParentSlug(HashMap<&'static str, T>),
    /// Substring rules over `parent/slug`, sorted by descending priority.
    Keywords(Vec<KeywordRule<T>>),
}

impl<T: Copy> Strategy<T> {
    fn apply(&self, path: &SlugPath<'_>) -> Option<T> {
        match self {
            Strategy::OwnSlug(table) => table.get(path.slug).copied(),
            Strategy::ParentSlug(table) => path.parent_slug.and_then(|p| table.get(p).copied()),
            Strategy::Keywords(rules) => {
                let joined = path.joined();
                rules.iter().find(|r| r.matches(&joined)).map(|r| r.value)
            }
        }
    }
}

/// An ordered list of strategies; the first hit wins.
#[derive(Debug, Clone)]
pub struct Resolver<T> {
    strategies: Vec<Strategy<T>>,
}

impl<T: Copy> Resolver<T> {
    /// Standard exact → parent → keyword resolver over one slug table.
    pub fn from_tables(slugs: &[(&'static str, T)], mut rules: Vec<KeywordRule<T>>) -> Self {
        let table: HashMap<&'static str, T> = slugs.iter().copied().collect();
        // Stable sort keeps declaration order among equal priorities.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self {
            strategies: vec![
                Strategy::OwnSlug(table.clone()),
                Strategy::ParentSlug(table),
                Strategy::Keywords(rules),
            ],
        }
    }

    pub fn resolve(&self, path: &SlugPath<'_>) -> Option<T> {
        self.strategies.iter().find_map(|s| s.apply(path))
    }
}

/// Resolves categories to their facet schema and brand list.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    category_types: Resolver<CategoryType>,
    brand_types: Resolver<BrandType>,
}

impl SchemaResolver {
    pub fn new(
        category_types: Resolver<CategoryType>,
        brand_types: Resolver<BrandType>,
    ) -> Self {
        Self {
            category_types,
            brand_types,
        }
    }

    /// Category type of a slug path; generic when nothing matches.
    pub fn category_type_of(&self, path: &SlugPath<'_>) -> CategoryType {
        self.category_types
            .resolve(path)
            .unwrap_or(CategoryType::Generic)
    }

    /// Brand type of a slug path; `None` when the category has no brand facet.
    pub fn brand_type_of(&self, path: &SlugPath<'_>) -> Option<BrandType> {
        self.brand_types.resolve(path)
    }

    /// Category type of a category id. Unknown ids are generic.
    pub fn resolve_category_type(&self, tree: &CategoryTree, id: &CategoryId) -> CategoryType {
        match tree.get(id) {
            Some(category) => self.category_type_of(&SlugPath::of(tree, category)),
            None => CategoryType::Generic,
        }
    }

    /// Brand type of a category id. Unknown ids have no brand facet.
    pub fn resolve_brand_type(&self, tree: &CategoryTree, id: &CategoryId) -> Option<BrandType> {
        tree.get(id)
            .and_then(|category| self.brand_type_of(&SlugPath::of(tree, category)))
    }
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self::new(
            Resolver::from_tables(tables::CATEGORY_TYPE_SLUGS, tables::category_type_rules()),
            Resolver::from_tables(tables::BRAND_TYPE_SLUGS, tables::brand_type_rules()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    fn tree() -> CategoryTree {
        let vehicles = Category::new_root("1", "vehicules", LocalizedText::default());
        let cars = Category::new_child(&vehicles, "10", "voitures", LocalizedText::default());
        let classics = Category::new_child(&vehicles, "12", "collection", LocalizedText::default());
        let estate = Category::new_root("2", "immobilier", LocalizedText::default());
        let villas = Category::new_child(&estate, "20", "maisons-villas", LocalizedText::default());
        let misc = Category::new_root("9", "divers", LocalizedText::default());
        let luxury = Category::new_root("8", "location-immobiliere-luxe", LocalizedText::default());
        let hybrid = Category::new_child(&misc, "91", "auto-radio", LocalizedText::default());
        CategoryTree::new(vec![vehicles, cars, classics, estate, villas, misc, luxury, hybrid])
    }

    #[test]
    fn test_own_slug_wins() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        assert_eq!(
            resolver.resolve_category_type(&tree, &CategoryId::new("10")),
            CategoryType::Vehicle
        );
        assert_eq!(
            resolver.resolve_brand_type(&tree, &CategoryId::new("10")),
            Some(BrandType::Vehicles)
        );
    }

    #[test]
    fn test_parent_slug_fallback() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        // "collection" is unknown on its own, its parent decides.
        assert_eq!(
            resolver.resolve_category_type(&tree, &CategoryId::new("12")),
            CategoryType::Vehicle
        );
    }

    #[test]
    fn test_keyword_rules_prefer_rental_over_real_estate() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        assert_eq!(
            resolver.resolve_category_type(&tree, &CategoryId::new("8")),
            CategoryType::Rental
        );
    }

    #[test]
    fn test_keyword_rules_read_joined_path() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        assert_eq!(
            resolver.resolve_category_type(&tree, &CategoryId::new("91")),
            CategoryType::Vehicle
        );
    }

    #[test]
    fn test_no_match_falls_back() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        let misc = CategoryId::new("9");
        assert_eq!(resolver.resolve_category_type(&tree, &misc), CategoryType::Generic);
        assert_eq!(resolver.resolve_brand_type(&tree, &misc), None);
        assert_eq!(
            resolver.resolve_category_type(&tree, &CategoryId::new("missing")),
            CategoryType::Generic
        );
    }

    #[test]
    fn test_real_estate_has_no_brand() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        let villas = CategoryId::new("20");
        assert_eq!(resolver.resolve_category_type(&tree, &villas), CategoryType::RealEstate);
        assert_eq!(resolver.resolve_brand_type(&tree, &villas), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = SchemaResolver::default();
        let tree = tree();
        for category in tree.iter() {
            assert_eq!(
                resolver.resolve_category_type(&tree, &category.id),
                resolver.resolve_category_type(&tree, &category.id)
            );
            assert_eq!(
                resolver.resolve_brand_type(&tree, &category.id),
                resolver.resolve_brand_type(&tree, &category.id)
            );
        }
    }

    #[test]
    fn test_equal_priority_keeps_declaration_order() {
        let resolver = Resolver::from_tables(
            &[],
            vec![
                KeywordRule::new(1, &["a"], 1u8),
                KeywordRule::new(1, &["ab"], 2u8),
                KeywordRule::new(0, &["abc"], 3u8),
            ],
        );
        assert_eq!(resolver.resolve(&SlugPath::new("abc", None)), Some(1));
    }
}
