//! Category and brand classifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Facet-schema class of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Vehicle,
    RealEstate,
    Rental,
    Electronics,
    Employment,
    Service,
    Animals,
    #[default]
    Generic,
}

impl CategoryType {
    pub const ALL: [CategoryType; 8] = [
        CategoryType::Vehicle,
        CategoryType::RealEstate,
        CategoryType::Rental,
        CategoryType::Electronics,
        CategoryType::Employment,
        CategoryType::Service,
        CategoryType::Animals,
        CategoryType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Vehicle => "vehicle",
            CategoryType::RealEstate => "real_estate",
            CategoryType::Rental => "rental",
            CategoryType::Electronics => "electronics",
            CategoryType::Employment => "employment",
            CategoryType::Service => "service",
            CategoryType::Animals => "animals",
            CategoryType::Generic => "generic",
        }
    }

    /// Rental categories only offer the "for rent" listing toggle.
    pub fn is_rental(&self) -> bool {
        matches!(self, CategoryType::Rental)
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects which brand/model reference list applies to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandType {
    Vehicles,
    Electronics,
    Fashion,
    HomeGarden,
    SportsLeisure,
    Services,
}

impl BrandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandType::Vehicles => "vehicles",
            BrandType::Electronics => "electronics",
            BrandType::Fashion => "fashion",
            BrandType::HomeGarden => "home_garden",
            BrandType::SportsLeisure => "sports_leisure",
            BrandType::Services => "services",
        }
    }
}

impl fmt::Display for BrandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
