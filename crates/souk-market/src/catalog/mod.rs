//! Catalog reference data.
//!
//! Contains the category tree and the brand, model and region lookups the
//! facet panel offers.

mod category;
mod reference;
mod tree;

pub use category::Category;
pub use reference::{brand_name, model_name, Brand, Model, Region, SubRegion};
pub use tree::CategoryTree;
