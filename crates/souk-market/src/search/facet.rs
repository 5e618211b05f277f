//! Facet keys, values and the predicate each key applies.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// One filter dimension. Serialized with the camelCase names the UI uses
/// (`propertyType`, `surfaceMin`, `hasPool`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetKey {
    // Store-native
    Region,
    SubRegion,
    PriceMin,
    PriceMax,
    // Identity
    Brand,
    Model,
    Fuel,
    Transmission,
    Condition,
    PropertyType,
    Furnished,
    Gender,
    ContractType,
    // Numeric ranges
    YearMin,
    YearMax,
    MileageMin,
    MileageMax,
    SurfaceMin,
    SurfaceMax,
    RentMin,
    RentMax,
    // Buckets
    Rooms,
    Bedrooms,
    Bathrooms,
    // Amenities
    HasWifi,
    HasParking,
    HasPool,
    HasElevator,
    HasGarden,
    HasAirConditioning,
    HasWarranty,
    HasPedigree,
    Vaccinated,
    RemoteWork,
    // Free text
    Breed,
    Sector,
    HealthStatus,
    Age,
    Color,
}

/// Where a predicate reads its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The listing's top-level price.
    Price,
    /// A key of the attributes bag.
    Attribute(&'static str),
}

/// Reference list used to turn an id into the display name listings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Brand,
    Model,
}

/// How a facet narrows the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Applied by the structured store query only.
    Store,
    /// Case-insensitive equality.
    Equals(Source),
    /// Case-insensitive equality after resolving an id to its name.
    EqualsResolved(Source, Lookup),
    /// Inclusive lower bound; a missing value reads as 0.
    AtLeast(Source),
    /// Inclusive upper bound; a missing value reads as a large sentinel.
    AtMost(Source),
    /// "1".."4" match exactly, "N+" matches N or more.
    Bucket(Source),
    /// The attribute must be literally `true`.
    Flag(&'static str),
    /// Case-insensitive substring containment.
    Contains(Source),
}

impl FacetKey {
    pub const ALL: [FacetKey; 39] = [
        FacetKey::Region,
        FacetKey::SubRegion,
        FacetKey::PriceMin,
        FacetKey::PriceMax,
        FacetKey::Brand,
        FacetKey::Model,
        FacetKey::Fuel,
        FacetKey::Transmission,
        FacetKey::Condition,
        FacetKey::PropertyType,
        FacetKey::Furnished,
        FacetKey::Gender,
        FacetKey::ContractType,
        FacetKey::YearMin,
        FacetKey::YearMax,
        FacetKey::MileageMin,
        FacetKey::MileageMax,
        FacetKey::SurfaceMin,
        FacetKey::SurfaceMax,
        FacetKey::RentMin,
        FacetKey::RentMax,
        FacetKey::Rooms,
        FacetKey::Bedrooms,
        FacetKey::Bathrooms,
        FacetKey::HasWifi,
        FacetKey::HasParking,
        FacetKey::HasPool,
        FacetKey::HasElevator,
        FacetKey::HasGarden,
        FacetKey::HasAirConditioning,
        FacetKey::HasWarranty,
        FacetKey::HasPedigree,
        FacetKey::Vaccinated,
        FacetKey::RemoteWork,
        FacetKey::Breed,
        FacetKey::Sector,
        FacetKey::HealthStatus,
        FacetKey::Age,
        FacetKey::Color,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKey::Region => "region",
            FacetKey::SubRegion => "subRegion",
            FacetKey::PriceMin => "priceMin",
            FacetKey::PriceMax => "priceMax",
            FacetKey::Brand => "brand",
            FacetKey::Model => "model",
            FacetKey::Fuel => "fuel",
            FacetKey::Transmission => "transmission",
            FacetKey::Condition => "condition",
            FacetKey::PropertyType => "propertyType",
            FacetKey::Furnished => "furnished",
            FacetKey::Gender => "gender",
            FacetKey::ContractType => "contractType",
            FacetKey::YearMin => "yearMin",
            FacetKey::YearMax => "yearMax",
            FacetKey::MileageMin => "mileageMin",
            FacetKey::MileageMax => "mileageMax",
            FacetKey::SurfaceMin => "surfaceMin",
            FacetKey::SurfaceMax => "surfaceMax",
            FacetKey::RentMin => "rentMin",
            FacetKey::RentMax => "rentMax",
            FacetKey::Rooms => "rooms",
            FacetKey::Bedrooms => "bedrooms",
            FacetKey::Bathrooms => "bathrooms",
            FacetKey::HasWifi => "hasWifi",
            FacetKey::HasParking => "hasParking",
            FacetKey::HasPool => "hasPool",
            FacetKey::HasElevator => "hasElevator",
            FacetKey::HasGarden => "hasGarden",
            FacetKey::HasAirConditioning => "hasAirConditioning",
            FacetKey::HasWarranty => "hasWarranty",
            FacetKey::HasPedigree => "hasPedigree",
            FacetKey::Vaccinated => "vaccinated",
            FacetKey::RemoteWork => "remoteWork",
            FacetKey::Breed => "breed",
            FacetKey::Sector => "sector",
            FacetKey::HealthStatus => "healthStatus",
            FacetKey::Age => "age",
            FacetKey::Color => "color",
        }
    }

    /// The predicate this key applies in the in-memory pass.
    pub fn predicate(&self) -> Predicate {
        use Predicate::*;
        use Source::{Attribute, Price};

        match self {
            FacetKey::Region | FacetKey::SubRegion => Store,
            FacetKey::PriceMin => AtLeast(Price),
            FacetKey::PriceMax => AtMost(Price),
            FacetKey::Brand => EqualsResolved(Attribute("brand_name"), Lookup::Brand),
            FacetKey::Model => EqualsResolved(Attribute("model_name"), Lookup::Model),
            FacetKey::Fuel => Equals(Attribute("fuel")),
            FacetKey::Transmission => Equals(Attribute("transmission")),
            FacetKey::Condition => Equals(Attribute("condition")),
            FacetKey::PropertyType => Equals(Attribute("property_type")),
            FacetKey::Furnished => Equals(Attribute("furnished")),
            FacetKey::Gender => Equals(Attribute("gender")),
            FacetKey::ContractType => Equals(Attribute("contract_type")),
            FacetKey::YearMin => AtLeast(Attribute("year")),
            FacetKey::YearMax => AtMost(Attribute("year")),
            FacetKey::MileageMin => AtLeast(Attribute("mileage")),
            FacetKey::MileageMax => AtMost(Attribute("mileage")),
            FacetKey::SurfaceMin => AtLeast(Attribute("surface_area")),
            FacetKey::SurfaceMax => AtMost(Attribute("surface_area")),
            FacetKey::RentMin => AtLeast(Attribute("monthly_rent")),
            FacetKey::RentMax => AtMost(Attribute("monthly_rent")),
            FacetKey::Rooms => Bucket(Attribute("rooms")),
            FacetKey::Bedrooms => Bucket(Attribute("bedrooms")),
            FacetKey::Bathrooms => Bucket(Attribute("bathrooms")),
            FacetKey::HasWifi => Flag("has_wifi"),
            FacetKey::HasParking => Flag("has_parking"),
            FacetKey::HasPool => Flag("has_pool"),
            FacetKey::HasElevator => Flag("has_elevator"),
            FacetKey::HasGarden => Flag("has_garden"),
            FacetKey::HasAirConditioning => Flag("has_air_conditioning"),
            FacetKey::HasWarranty => Flag("has_warranty"),
            FacetKey::HasPedigree => Flag("has_pedigree"),
            FacetKey::Vaccinated => Flag("vaccinated"),
            FacetKey::RemoteWork => Flag("remote_work"),
            FacetKey::Breed => Contains(Attribute("breed")),
            FacetKey::Sector => Contains(Attribute("sector")),
            FacetKey::HealthStatus => Contains(Attribute("health_status")),
            FacetKey::Age => Contains(Attribute("age")),
            FacetKey::Color => Contains(Attribute("color")),
        }
    }

    /// Whether the key takes a number (range bounds).
    pub fn is_numeric(&self) -> bool {
        matches!(self.predicate(), Predicate::AtLeast(_) | Predicate::AtMost(_))
    }

    /// Whether the key is an on/off amenity.
    pub fn is_flag(&self) -> bool {
        matches!(self.predicate(), Predicate::Flag(_))
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetKey {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacetKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| MarketError::UnknownFilterKey(s.to_string()))
    }
}

/// A selected facet value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FacetValue {
    pub fn text(value: impl Into<String>) -> Self {
        FacetValue::Text(value.into())
    }

    /// False for unset-like values: `false`, `0`, NaN and blank text.
    pub fn is_active(&self) -> bool {
        match self {
            FacetValue::Flag(b) => *b,
            FacetValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FacetValue::Text(s) => !s.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FacetValue::Text(s) => Cow::Borrowed(s.trim()),
            FacetValue::Number(n) => Cow::Owned(format_number(*n)),
            FacetValue::Flag(b) => Cow::Owned(b.to_string()),
        }
    }

    /// Numeric reading; numeric text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FacetValue::Number(n) => Some(*n),
            FacetValue::Text(s) => s.trim().parse().ok(),
            FacetValue::Flag(_) => None,
        }
    }

    /// Accepts `true` and the text "true".
    pub fn as_flag(&self) -> bool {
        match self {
            FacetValue::Flag(b) => *b,
            FacetValue::Text(s) => s.trim().eq_ignore_ascii_case("true"),
            FacetValue::Number(_) => false,
        }
    }
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        FacetValue::Text(s.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(s: String) -> Self {
        FacetValue::Text(s)
    }
}

impl From<bool> for FacetValue {
    fn from(b: bool) -> Self {
        FacetValue::Flag(b)
    }
}

impl From<f64> for FacetValue {
    fn from(n: f64) -> Self {
        FacetValue::Number(n)
    }
}

impl From<i64> for FacetValue {
    fn from(n: i64) -> Self {
        FacetValue::Number(n as f64)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for key in FacetKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            assert_eq!(key.as_str().parse::<FacetKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!("hasSauna".parse::<FacetKey>().is_err());
    }

    #[test]
    fn test_falsy_values_are_inactive() {
        assert!(!FacetValue::Flag(false).is_active());
        assert!(!FacetValue::Number(0.0).is_active());
        assert!(!FacetValue::text("  ").is_active());
        assert!(FacetValue::text("0").is_active());
        assert!(FacetValue::Flag(true).is_active());
    }

    #[test]
    fn test_untagged_values() {
        let v: FacetValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FacetValue::Flag(true));
        let v: FacetValue = serde_json::from_str("100").unwrap();
        assert_eq!(v.as_number(), Some(100.0));
        let v: FacetValue = serde_json::from_str("\"5+\"").unwrap();
        assert_eq!(v.as_text(), "5+");
    }

    #[test]
    fn test_number_as_text() {
        assert_eq!(FacetValue::Number(3.0).as_text(), "3");
        assert_eq!(FacetValue::Number(2.5).as_text(), "2.5");
    }

    #[test]
    fn test_key_kinds() {
        assert!(FacetKey::SurfaceMin.is_numeric());
        assert!(FacetKey::HasPool.is_flag());
        assert!(!FacetKey::Rooms.is_numeric());
        assert_eq!(FacetKey::Region.predicate(), Predicate::Store);
    }
}
