//! Slug tables and keyword rules for schema resolution.

use crate::schema::resolver::KeywordRule;
use crate::schema::{BrandType, CategoryType};

/// Store slug → category type.
pub const CATEGORY_TYPE_SLUGS: &[(&str, CategoryType)] = &[
    ("vehicules", CategoryType::Vehicle),
    ("voitures", CategoryType::Vehicle),
    ("motos", CategoryType::Vehicle),
    ("camions", CategoryType::Vehicle),
    ("pieces-auto", CategoryType::Vehicle),
    ("immobilier", CategoryType::RealEstate),
    ("appartements", CategoryType::RealEstate),
    ("maisons-villas", CategoryType::RealEstate),
    ("terrains", CategoryType::RealEstate),
    ("bureaux-commerces", CategoryType::RealEstate),
    ("location-immobiliere", CategoryType::Rental),
    ("location-vacances", CategoryType::Rental),
    ("colocation", CategoryType::Rental),
    ("electronique", CategoryType::Electronics),
    ("telephones", CategoryType::Electronics),
    ("informatique", CategoryType::Electronics),
    ("tv-audio", CategoryType::Electronics),
    ("consoles-jeux", CategoryType::Electronics),
    ("emploi", CategoryType::Employment),
    ("offres-emploi", CategoryType::Employment),
    ("demandes-emploi", CategoryType::Employment),
    ("services", CategoryType::Service),
    ("animaux", CategoryType::Animals),
    ("chiens", CategoryType::Animals),
    ("chats", CategoryType::Animals),
    ("oiseaux", CategoryType::Animals),
];

/// Store slug → brand type.
pub const BRAND_TYPE_SLUGS: &[(&str, BrandType)] = &[
    ("vehicules", BrandType::Vehicles),
    ("voitures", BrandType::Vehicles),
    ("motos", BrandType::Vehicles),
    ("camions", BrandType::Vehicles),
    ("pieces-auto", BrandType::Vehicles),
    ("electronique", BrandType::Electronics),
    ("telephones", BrandType::Electronics),
    ("informatique", BrandType::Electronics),
    ("tv-audio", BrandType::Electronics),
    ("consoles-jeux", BrandType::Electronics),
    ("mode", BrandType::Fashion),
    ("vetements", BrandType::Fashion),
    ("chaussures", BrandType::Fashion),
    ("montres-bijoux", BrandType::Fashion),
    ("maison-jardin", BrandType::HomeGarden),
    ("meubles", BrandType::HomeGarden),
    ("electromenager", BrandType::HomeGarden),
    ("sport-loisirs", BrandType::SportsLeisure),
    ("velos", BrandType::SportsLeisure),
    ("instruments", BrandType::SportsLeisure),
    ("services", BrandType::Services),
];

/// Fallback rules for category types. Rentals outrank real estate because a
/// rental slug also contains "immobilier".
pub fn category_type_rules() -> Vec<KeywordRule<CategoryType>> {
    vec![
        KeywordRule::new(
            100,
            &["location-immobiliere", "location-vacances", "colocation", "a-louer"],
            CategoryType::Rental,
        ),
        KeywordRule::new(90, &["emploi", "recrutement", "job"], CategoryType::Employment),
        KeywordRule::new(
            80,
            &["vehicule", "voiture", "auto", "moto", "camion"],
            CategoryType::Vehicle,
        ),
        KeywordRule::new(
            70,
            &["immobilier", "appartement", "villa", "terrain", "studio"],
            CategoryType::RealEstate,
        ),
        KeywordRule::new(
            60,
            &["electronique", "telephone", "informatique", "ordinateur", "smartphone"],
            CategoryType::Electronics,
        ),
        KeywordRule::new(50, &["animaux", "animal", "chien", "oiseau"], CategoryType::Animals),
        KeywordRule::new(40, &["service", "prestation", "reparation"], CategoryType::Service),
    ]
}

/// Fallback rules for brand types.
pub fn brand_type_rules() -> Vec<KeywordRule<BrandType>> {
    vec![
        KeywordRule::new(
            90,
            &["vehicule", "voiture", "auto", "moto", "camion"],
            BrandType::Vehicles,
        ),
        KeywordRule::new(
            80,
            &["electronique", "telephone", "informatique", "ordinateur"],
            BrandType::Electronics,
        ),
        KeywordRule::new(70, &["mode", "vetement", "chaussure", "bijou"], BrandType::Fashion),
        KeywordRule::new(
            60,
            &["maison-jardin", "jardin", "meuble", "decoration"],
            BrandType::HomeGarden,
        ),
        KeywordRule::new(50, &["sport", "loisir", "velo"], BrandType::SportsLeisure),
        KeywordRule::new(40, &["service"], BrandType::Services),
    ]
}
