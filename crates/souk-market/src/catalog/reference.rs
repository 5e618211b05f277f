//! Brand, model and region reference records.

use crate::ids::{BrandId, ModelId};
use crate::locale::LocalizedText;
use crate::schema::BrandType;
use serde::{Deserialize, Serialize};

/// A brand offered in the brand facet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    /// Display name; listings store this denormalized value.
    pub name: String,
    pub brand_type: BrandType,
}

impl Brand {
    pub fn new(id: impl Into<BrandId>, name: impl Into<String>, brand_type: BrandType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand_type,
        }
    }
}

/// A model belonging to a brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub id: ModelId,
    pub brand_id: BrandId,
    pub name: String,
}

impl Model {
    pub fn new(id: impl Into<ModelId>, brand_id: impl Into<BrandId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand_id: brand_id.into(),
            name: name.into(),
        }
    }
}

/// A top-level administrative region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    /// Store code, used as the Phase A region filter.
    pub code: String,
    pub name: LocalizedText,
}

/// A sub-region (city or district) inside a region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubRegion {
    pub region_code: String,
    pub name: String,
}

/// Look up the display name of a brand id.
pub fn brand_name<'a>(brands: &'a [Brand], id: &str) -> Option<&'a str> {
    brands
        .iter()
        .find(|b| b.id.as_str() == id)
        .map(|b| b.name.as_str())
}

/// Look up the display name of a model id.
pub fn model_name<'a>(models: &'a [Model], id: &str) -> Option<&'a str> {
    models
        .iter()
        .find(|m| m.id.as_str() == id)
        .map(|m| m.name.as_str())
}
