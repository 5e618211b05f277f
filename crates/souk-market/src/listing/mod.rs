//! Listing records as returned by the store.

mod attributes;

pub use attributes::Attributes;

use crate::ids::{CategoryId, ListingId, UserId};
use serde::{Deserialize, Serialize};

/// How the price of a listing is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    Fixed,
    /// Price on request.
    Quote,
    Free,
}

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Active,
    Pending,
    Sold,
    Expired,
}

/// The store's listing-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// Something offered.
    #[default]
    Sell,
    /// Something wanted.
    Buy,
    /// Offered for rent.
    Rent,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Sell => "sell",
            ListingKind::Buy => "buy",
            ListingKind::Rent => "rent",
        }
    }
}

/// Where a listing is located.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingLocation {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sub_region: Option<String>,
}

impl ListingLocation {
    pub fn new(region: impl Into<String>, sub_region: Option<String>) -> Self {
        Self {
            region: Some(region.into()),
            sub_region,
        }
    }
}

/// A classified listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub price_type: PriceType,
    /// Root category.
    pub category_id: CategoryId,
    #[serde(default)]
    pub subcategory_id: Option<CategoryId>,
    #[serde(default)]
    pub kind: ListingKind,
    #[serde(default)]
    pub location: ListingLocation,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Listing {
    /// Create an active fixed-price listing with no attributes.
    pub fn new(
        id: impl Into<ListingId>,
        title: impl Into<String>,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: None,
            price_type: PriceType::Fixed,
            category_id: category_id.into(),
            subcategory_id: None,
            kind: ListingKind::Sell,
            location: ListingLocation::default(),
            status: ListingStatus::Active,
            owner_id: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_subcategory(mut self, id: impl Into<CategoryId>) -> Self {
        self.subcategory_id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: ListingKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_location(mut self, location: ListingLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    /// Case-insensitive match of a search term against title and description.
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}
