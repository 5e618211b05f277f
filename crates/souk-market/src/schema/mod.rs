//! Category → facet schema resolution.

mod resolver;
mod tables;
mod types;

pub use resolver::{KeywordRule, Resolver, SchemaResolver, SlugPath, Strategy};
pub use tables::{brand_type_rules, category_type_rules, BRAND_TYPE_SLUGS, CATEGORY_TYPE_SLUGS};
pub use types::{BrandType, CategoryType};
