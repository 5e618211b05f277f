//! Listing-type toggle and its translation to the store vocabulary.

use serde::{Deserialize, Serialize};

use crate::listing::ListingKind;
use crate::locale::Language;
use crate::schema::CategoryType;

/// The toggle as the panel presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingTypeToggle {
    /// Nothing selected.
    #[default]
    Any,
    /// "Offre": something offered.
    Offer,
    /// "Demande": something wanted.
    Request,
    /// The single switch of rental categories.
    ForRent,
}

/// Which toggle a panel presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleMode {
    /// One on/off "for rent" switch.
    RentOnly,
    /// Two-way offer / request choice.
    OfferRequest,
}

impl ToggleMode {
    pub fn for_category_type(category_type: Option<CategoryType>) -> Self {
        match category_type {
            Some(ct) if ct.is_rental() => ToggleMode::RentOnly,
            _ => ToggleMode::OfferRequest,
        }
    }

    /// Toggle values meaningful in this mode, `Any` excluded.
    pub fn options(&self) -> &'static [ListingTypeToggle] {
        match self {
            ToggleMode::RentOnly => &[ListingTypeToggle::ForRent],
            ToggleMode::OfferRequest => &[ListingTypeToggle::Offer, ListingTypeToggle::Request],
        }
    }
}

impl ListingTypeToggle {
    /// Store kind for the Phase A query. Values that do not belong to the
    /// current mode mean "any".
    pub fn to_store_kind(self, mode: ToggleMode) -> Option<ListingKind> {
        match (mode, self) {
            (ToggleMode::RentOnly, ListingTypeToggle::ForRent) => Some(ListingKind::Rent),
            (ToggleMode::OfferRequest, ListingTypeToggle::Offer) => Some(ListingKind::Sell),
            (ToggleMode::OfferRequest, ListingTypeToggle::Request) => Some(ListingKind::Buy),
            _ => None,
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (ListingTypeToggle::Any, Language::Fr) => "Tout",
            (ListingTypeToggle::Any, Language::En) => "All",
            (ListingTypeToggle::Any, Language::Ar) => "الكل",
            (ListingTypeToggle::Offer, Language::Fr) => "Offre",
            (ListingTypeToggle::Offer, Language::En) => "Offer",
            (ListingTypeToggle::Offer, Language::Ar) => "عرض",
            (ListingTypeToggle::Request, Language::Fr) => "Demande",
            (ListingTypeToggle::Request, Language::En) => "Wanted",
            (ListingTypeToggle::Request, Language::Ar) => "طلب",
            (ListingTypeToggle::ForRent, Language::Fr) => "À louer",
            (ListingTypeToggle::ForRent, Language::En) => "For rent",
            (ListingTypeToggle::ForRent, Language::Ar) => "للكراء",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rental_mode() {
        let mode = ToggleMode::for_category_type(Some(CategoryType::Rental));
        assert_eq!(mode, ToggleMode::RentOnly);
        assert_eq!(ListingTypeToggle::ForRent.to_store_kind(mode), Some(ListingKind::Rent));
        assert_eq!(ListingTypeToggle::Offer.to_store_kind(mode), None);
        assert_eq!(ListingTypeToggle::Any.to_store_kind(mode), None);
    }

    #[test]
    fn test_offer_request_mode() {
        let mode = ToggleMode::for_category_type(Some(CategoryType::Vehicle));
        assert_eq!(mode, ToggleMode::OfferRequest);
        assert_eq!(ListingTypeToggle::Offer.to_store_kind(mode), Some(ListingKind::Sell));
        assert_eq!(ListingTypeToggle::Request.to_store_kind(mode), Some(ListingKind::Buy));
        assert_eq!(ListingTypeToggle::ForRent.to_store_kind(mode), None);
    }

    #[test]
    fn test_no_category_uses_offer_request() {
        assert_eq!(ToggleMode::for_category_type(None), ToggleMode::OfferRequest);
    }
}
