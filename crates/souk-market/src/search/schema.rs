//! Facet panels per category type.

use serde::Serialize;

use crate::schema::{BrandType, CategoryType};
use crate::search::{FacetKey, ToggleMode};

use FacetKey::*;

/// Facets every panel offers, with or without a category.
const COMMON: &[FacetKey] = &[Region, SubRegion, PriceMin, PriceMax];

/// Offered only when the category has a brand type.
const BRANDED: &[FacetKey] = &[Brand, Model];

/// Category type → specific facets.
fn specific_facets(category_type: CategoryType) -> &'static [FacetKey] {
    match category_type {
        CategoryType::Vehicle => &[
            YearMin, YearMax, MileageMin, MileageMax, Fuel, Transmission, Condition, Color,
        ],
        CategoryType::RealEstate => &[
            PropertyType, SurfaceMin, SurfaceMax, Rooms, Bedrooms, Bathrooms, Furnished,
            HasParking, HasPool, HasElevator, HasGarden,
        ],
        CategoryType::Rental => &[
            RentMin, RentMax, PropertyType, SurfaceMin, SurfaceMax, Rooms, Bedrooms, Bathrooms,
            Furnished, HasWifi, HasParking, HasPool, HasElevator, HasAirConditioning,
        ],
        CategoryType::Electronics => &[Condition, HasWarranty, Color],
        CategoryType::Employment => &[ContractType, Sector, RemoteWork],
        CategoryType::Service => &[Sector],
        CategoryType::Animals => &[Breed, Gender, Age, Vaccinated, HasPedigree, HealthStatus],
        CategoryType::Generic => &[Condition, Color],
    }
}

/// The facets shown, and applied, for one category selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetSchema {
    pub category_type: Option<CategoryType>,
    pub brand_type: Option<BrandType>,
    keys: Vec<FacetKey>,
}

impl FacetSchema {
    /// Panel for a category type, or the bare panel when nothing is selected.
    /// Brand and model appear only when the category has a brand type.
    pub fn for_category(category_type: Option<CategoryType>, brand_type: Option<BrandType>) -> Self {
        let mut keys = COMMON.to_vec();
        if let Some(ct) = category_type {
            if brand_type.is_some() {
                keys.extend_from_slice(BRANDED);
            }
            keys.extend_from_slice(specific_facets(ct));
        }
        Self {
            category_type,
            // A brand facet without a category is meaningless.
            brand_type: category_type.and(brand_type),
            keys,
        }
    }

    /// Panel with no category selected.
    pub fn uncategorized() -> Self {
        Self::for_category(None, None)
    }

    pub fn keys(&self) -> &[FacetKey] {
        &self.keys
    }

    pub fn contains(&self, key: FacetKey) -> bool {
        self.keys.contains(&key)
    }

    /// Which listing-type toggle the panel presents.
    pub fn toggle_mode(&self) -> ToggleMode {
        ToggleMode::for_category_type(self.category_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncategorized_panel_is_common_only() {
        let schema = FacetSchema::uncategorized();
        assert_eq!(schema.keys(), COMMON);
        assert!(!schema.contains(HasPool));
        assert!(!schema.contains(Brand));
    }

    #[test]
    fn test_vehicle_panel_has_brand() {
        let schema = FacetSchema::for_category(Some(CategoryType::Vehicle), Some(BrandType::Vehicles));
        assert!(schema.contains(Brand));
        assert!(schema.contains(Model));
        assert!(schema.contains(MileageMax));
        assert!(!schema.contains(HasPool));
    }

    #[test]
    fn test_real_estate_panel_has_no_brand() {
        let schema = FacetSchema::for_category(Some(CategoryType::RealEstate), None);
        assert!(schema.contains(PropertyType));
        assert!(schema.contains(HasPool));
        assert!(!schema.contains(Brand));
    }

    #[test]
    fn test_brand_type_needs_category() {
        let schema = FacetSchema::for_category(None, Some(BrandType::Fashion));
        assert_eq!(schema.brand_type, None);
        assert!(!schema.contains(Brand));
    }

    #[test]
    fn test_no_duplicate_keys() {
        for ct in CategoryType::ALL {
            let schema = FacetSchema::for_category(Some(ct), Some(BrandType::Vehicles));
            let mut keys = schema.keys().to_vec();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), schema.keys().len(), "duplicate facet in {}", ct);
        }
    }
}
