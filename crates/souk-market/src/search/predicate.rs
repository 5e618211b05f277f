//! Phase B: in-memory attribute predicates.

use std::borrow::Cow;

use tracing::debug;

use crate::catalog::{brand_name, model_name, Brand, Model};
use crate::listing::Listing;
use crate::search::{FacetKey, FacetSchema, FilterState, Lookup, Predicate, Source};

/// Upper-bound reading for a missing numeric attribute.
const MISSING_MAX: f64 = f64::MAX;

/// Brand and model names used to resolve id-valued facets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceNames<'a> {
    pub brands: &'a [Brand],
    pub models: &'a [Model],
}

impl<'a> ReferenceNames<'a> {
    pub fn new(brands: &'a [Brand], models: &'a [Model]) -> Self {
        Self { brands, models }
    }

    fn resolve<'v>(&self, lookup: Lookup, value: &'v str) -> Cow<'v, str> {
        let name = match lookup {
            Lookup::Brand => brand_name(self.brands, value),
            Lookup::Model => model_name(self.models, value),
        };
        match name {
            Some(name) => Cow::Owned(name.to_string()),
            None => Cow::Borrowed(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Check {
    Equals(Source, String),
    AtLeast(Source, f64),
    AtMost(Source, f64),
    BucketAtLeast(Source, f64),
    BucketExact(Source, String),
    Flag(&'static str),
    Contains(Source, String),
}

/// One compiled facet predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    pub key: FacetKey,
    check: Check,
}

impl CompiledPredicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        match &self.check {
            Check::Equals(source, expected) => text_of(listing, *source)
                .map_or(false, |actual| actual.trim().to_lowercase() == *expected),
            Check::AtLeast(source, bound) => number_of(listing, *source).unwrap_or(0.0) >= *bound,
            Check::AtMost(source, bound) => {
                number_of(listing, *source).unwrap_or(MISSING_MAX) <= *bound
            }
            Check::BucketAtLeast(source, floor) => {
                number_of(listing, *source).map_or(false, |n| n >= *floor)
            }
            Check::BucketExact(source, expected) => match expected.parse::<f64>() {
                Ok(wanted) => number_of(listing, *source).map_or(false, |n| n == wanted),
                Err(_) => text_of(listing, *source)
                    .map_or(false, |actual| actual.trim().to_lowercase() == *expected),
            },
            Check::Flag(attribute) => listing.attributes.is_true(attribute),
            Check::Contains(source, needle) => text_of(listing, *source)
                .map_or(false, |actual| actual.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// The AND of every active facet the schema knows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    predicates: Vec<CompiledPredicate>,
}

impl PredicateSet {
    /// Compile the active entries of `state` that belong to `schema`.
    ///
    /// Store-only keys are skipped, as are range bounds that do not parse.
    pub fn compile(state: &FilterState, schema: &FacetSchema, names: ReferenceNames<'_>) -> Self {
        let mut predicates = Vec::new();

        for (key, value) in state.active_entries() {
            if !schema.contains(key) {
                continue;
            }
            let text = value.as_text();
            let check = match key.predicate() {
                Predicate::Store => continue,
                Predicate::Equals(source) => Check::Equals(source, text.to_lowercase()),
                Predicate::EqualsResolved(source, lookup) => {
                    Check::Equals(source, names.resolve(lookup, &text).trim().to_lowercase())
                }
                Predicate::AtLeast(source) => match value.as_number() {
                    Some(bound) => Check::AtLeast(source, bound),
                    None => {
                        debug!(key = %key, value = %text, "Ignoring unparsable bound");
                        continue;
                    }
                },
                Predicate::AtMost(source) => match value.as_number() {
                    Some(bound) => Check::AtMost(source, bound),
                    None => {
                        debug!(key = %key, value = %text, "Ignoring unparsable bound");
                        continue;
                    }
                },
                Predicate::Bucket(source) => bucket_check(source, &text),
                Predicate::Flag(attribute) => {
                    if !value.as_flag() {
                        continue;
                    }
                    Check::Flag(attribute)
                }
                Predicate::Contains(source) => Check::Contains(source, text.to_lowercase()),
            };
            predicates.push(CompiledPredicate { key, check });
        }

        Self { predicates }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.predicates.iter().all(|p| p.matches(listing))
    }

    /// Keep only the listings every predicate accepts.
    pub fn apply(&self, listings: &mut Vec<Listing>) {
        if self.predicates.is_empty() {
            return;
        }
        listings.retain(|listing| self.matches(listing));
    }

    pub fn keys(&self) -> impl Iterator<Item = FacetKey> + '_ {
        self.predicates.iter().map(|p| p.key)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

fn bucket_check(source: Source, text: &str) -> Check {
    if let Some(floor) = text.strip_suffix('+').and_then(|n| n.trim().parse::<f64>().ok()) {
        return Check::BucketAtLeast(source, floor);
    }
    Check::BucketExact(source, text.to_lowercase())
}

fn text_of(listing: &Listing, source: Source) -> Option<Cow<'_, str>> {
    match source {
        Source::Price => listing.price.map(|p| Cow::Owned(p.to_string())),
        Source::Attribute(key) => listing.attributes.text(key),
    }
}

fn number_of(listing: &Listing, source: Source) -> Option<f64> {
    match source {
        Source::Price => listing.price,
        Source::Attribute(key) => listing.attributes.number(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Attributes;
    use crate::schema::{BrandType, CategoryType};
    use serde_json::json;

    fn listing(id: &str, attributes: Attributes) -> Listing {
        Listing::new(id, format!("listing {id}"), "2").with_attributes(attributes)
    }

    fn real_estate() -> FacetSchema {
        FacetSchema::for_category(Some(CategoryType::RealEstate), None)
    }

    fn compile(state: &FilterState, schema: &FacetSchema) -> PredicateSet {
        PredicateSet::compile(state, schema, ReferenceNames::default())
    }

    #[test]
    fn test_villa_with_surface() {
        let state = FilterState::new()
            .with(FacetKey::PropertyType, "Villa")
            .with(FacetKey::SurfaceMin, "100");
        let set = compile(&state, &real_estate());
        assert_eq!(set.len(), 2);

        let mut listings = vec![
            listing("1", Attributes::new().with("property_type", "villa").with("surface_area", "150")),
            listing("2", Attributes::new().with("property_type", "villa").with("surface_area", "80")),
            listing("3", Attributes::new().with("property_type", "appartement").with("surface_area", "200")),
            listing("4", Attributes::new().with("property_type", "Villa")),
        ];
        set.apply(&mut listings);

        let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_missing_attribute_against_bounds() {
        let bare = listing("1", Attributes::new());

        let min_zero = FilterState::new().with(FacetKey::SurfaceMin, "0");
        // A zero bound is inactive, so nothing is compiled.
        assert!(compile(&min_zero, &real_estate()).is_empty());

        let negative = FilterState::new().with(FacetKey::SurfaceMin, -5.0);
        assert!(compile(&negative, &real_estate()).matches(&bare));

        let min = FilterState::new().with(FacetKey::SurfaceMin, 10.0);
        assert!(!compile(&min, &real_estate()).matches(&bare));

        let max = FilterState::new().with(FacetKey::SurfaceMax, 500.0);
        assert!(!compile(&max, &real_estate()).matches(&bare));
    }

    #[test]
    fn test_unparsable_bound_ignored() {
        let state = FilterState::new().with(FacetKey::SurfaceMin, "beaucoup");
        assert!(compile(&state, &real_estate()).is_empty());
    }

    #[test]
    fn test_flag_requires_literal_true() {
        let state = FilterState::new().with(FacetKey::HasPool, true);
        let set = compile(&state, &real_estate());

        assert!(set.matches(&listing("1", Attributes::new().with("has_pool", true))));
        assert!(!set.matches(&listing("2", Attributes::new().with("has_pool", false))));
        assert!(!set.matches(&listing("3", Attributes::new().with("has_pool", "true"))));
        assert!(!set.matches(&listing("4", Attributes::new().with("has_pool", 1))));
        assert!(!set.matches(&listing("5", Attributes::new())));
    }

    #[test]
    fn test_buckets() {
        let schema = real_estate();
        let three = listing("1", Attributes::new().with("rooms", "3"));
        let six = listing("2", Attributes::new().with("rooms", json!(6)));

        let exact = compile(&FilterState::new().with(FacetKey::Rooms, "3"), &schema);
        assert!(exact.matches(&three));
        assert!(!exact.matches(&six));

        let open = compile(&FilterState::new().with(FacetKey::Rooms, "5+"), &schema);
        assert!(!open.matches(&three));
        assert!(open.matches(&six));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let schema = FacetSchema::for_category(Some(CategoryType::Animals), None);
        let set = compile(&FilterState::new().with(FacetKey::Breed, "Berger"), &schema);

        assert!(set.matches(&listing("1", Attributes::new().with("breed", "berger allemand"))));
        assert!(!set.matches(&listing("2", Attributes::new().with("breed", "caniche"))));
        assert!(!set.matches(&listing("3", Attributes::new())));
    }

    #[test]
    fn test_brand_id_resolves_to_name() {
        let brands = vec![Brand::new("b1", "Toyota", BrandType::Vehicles)];
        let models = vec![Model::new("m1", "b1", "Corolla")];
        let schema = FacetSchema::for_category(Some(CategoryType::Vehicle), Some(BrandType::Vehicles));
        let state = FilterState::new()
            .with(FacetKey::Brand, "b1")
            .with(FacetKey::Model, "m1");
        let set = PredicateSet::compile(&state, &schema, ReferenceNames::new(&brands, &models));

        let corolla = listing(
            "1",
            Attributes::new().with("brand_name", "TOYOTA").with("model_name", "corolla"),
        );
        let yaris = listing(
            "2",
            Attributes::new().with("brand_name", "Toyota").with("model_name", "Yaris"),
        );
        assert!(set.matches(&corolla));
        assert!(!set.matches(&yaris));
    }

    #[test]
    fn test_unresolved_brand_compares_raw_value() {
        let schema = FacetSchema::for_category(Some(CategoryType::Vehicle), Some(BrandType::Vehicles));
        let set = compile(&FilterState::new().with(FacetKey::Brand, "Renault"), &schema);
        assert!(set.matches(&listing("1", Attributes::new().with("brand_name", "renault"))));
    }

    #[test]
    fn test_keys_outside_schema_are_inert() {
        let state = FilterState::new()
            .with(FacetKey::Fuel, "diesel")
            .with(FacetKey::Region, "alger");
        assert!(compile(&state, &real_estate()).is_empty());
        assert!(compile(&state, &FacetSchema::uncategorized()).is_empty());
    }
}
