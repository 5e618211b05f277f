//! Compiled-in keyword lexicon for category detection.

use crate::locale::Language;

/// Keywords of one logical category, per language.
#[derive(Debug, Clone, Copy)]
pub struct LexiconEntry {
    /// Logical category id, e.g. `"vehicles"`.
    pub id: &'static str,
    pub fr: &'static [&'static str],
    pub en: &'static [&'static str],
    pub ar: &'static [&'static str],
}

impl LexiconEntry {
    /// Keywords for `lang`, or the French list when that language has none.
    pub fn keywords(&self, lang: Language) -> &'static [&'static str] {
        let list = match lang {
            Language::Fr => self.fr,
            Language::En => self.en,
            Language::Ar => self.ar,
        };
        if list.is_empty() {
            self.fr
        } else {
            list
        }
    }
}

/// Logical category id → store category slug.
pub const LOGICAL_SLUGS: &[(&str, &str)] = &[
    ("animals", "animaux"),
    ("electronics", "electronique"),
    ("fashion", "mode"),
    ("home_garden", "maison-jardin"),
    ("jobs", "emploi"),
    ("real_estate", "immobilier"),
    ("rentals", "location-immobiliere"),
    ("services", "services"),
    ("sport", "sport-loisirs"),
    ("vehicles", "vehicules"),
];

/// Store slug of a logical category.
pub fn slug_for(logical_id: &str) -> Option<&'static str> {
    LOGICAL_SLUGS
        .iter()
        .find(|(id, _)| *id == logical_id)
        .map(|(_, slug)| *slug)
}

pub const LEXICON: &[LexiconEntry] = &[
    LexiconEntry {
        id: "vehicles",
        fr: &[
            "voiture", "voitures", "auto", "automobile", "moto", "motos", "camion", "vehicule",
            "véhicule", "4x4", "berline", "citadine", "scooter", "toyota", "renault", "peugeot",
            "dacia", "volkswagen", "hyundai", "kia", "mercedes", "bmw", "audi", "citroen", "fiat",
            "ford", "nissan", "suzuki", "yamaha", "diesel", "essence", "pneu", "pneus",
        ],
        en: &[
            "car", "cars", "vehicle", "truck", "motorcycle", "motorbike", "scooter", "sedan",
            "suv", "toyota", "renault", "peugeot", "dacia", "volkswagen", "hyundai", "kia",
            "mercedes", "bmw", "audi", "ford", "nissan", "suzuki", "yamaha", "diesel", "tyres",
        ],
        ar: &[
            "سيارة", "سيارات", "دراجة", "شاحنة", "مركبة", "تويوتا", "رونو", "بيجو", "مرسيدس",
            "ديزل",
        ],
    },
    LexiconEntry {
        id: "real_estate",
        fr: &[
            "appartement", "appartements", "maison", "villa", "studio", "terrain", "immobilier",
            "duplex", "immeuble", "bureau", "hangar",
        ],
        en: &[
            "apartment", "house", "villa", "studio", "land", "flat", "property", "duplex",
            "building", "office",
        ],
        ar: &["شقة", "منزل", "فيلا", "أرض", "عقار", "ستوديو", "دوبلكس"],
    },
    LexiconEntry {
        id: "rentals",
        fr: &["location", "louer", "loyer", "colocation", "meublé", "vacances", "saisonnier"],
        en: &["rent", "rental", "lease", "roommate", "holiday"],
        ar: &["كراء", "إيجار", "للكراء", "للإيجار"],
    },
    LexiconEntry {
        id: "electronics",
        fr: &[
            "téléphone", "telephone", "smartphone", "iphone", "samsung", "xiaomi", "huawei",
            "ordinateur", "laptop", "pc", "tablette", "télévision", "tv", "écran", "console",
            "playstation", "ps5", "xbox", "casque",
        ],
        en: &[
            "phone", "smartphone", "iphone", "samsung", "laptop", "computer", "tablet",
            "television", "tv", "screen", "console", "playstation", "xbox", "headphones",
            "camera",
        ],
        ar: &["هاتف", "جوال", "حاسوب", "تلفاز", "سامسونج", "ايفون"],
    },
    LexiconEntry {
        id: "jobs",
        fr: &["emploi", "travail", "job", "stage", "recrutement", "cdi", "cdd", "poste"],
        en: &["job", "jobs", "work", "employment", "hiring", "internship", "career", "vacancy"],
        ar: &["عمل", "وظيفة", "توظيف", "تدريب"],
    },
    LexiconEntry {
        id: "services",
        fr: &[
            "service", "services", "réparation", "reparation", "plombier", "électricien",
            "electricien", "ménage", "déménagement", "cours", "traduction", "nettoyage",
        ],
        en: &[
            "service", "repair", "plumber", "electrician", "cleaning", "moving", "lessons",
            "tutoring", "translation",
        ],
        ar: &["خدمة", "خدمات", "إصلاح", "سباك", "كهربائي", "تنظيف"],
    },
    LexiconEntry {
        id: "animals",
        fr: &[
            "chien", "chiens", "chat", "chats", "chiot", "chaton", "oiseau", "perroquet",
            "cheval", "mouton", "lapin", "poisson", "animal", "animaux", "berger",
        ],
        en: &[
            "dog", "dogs", "cat", "cats", "puppy", "kitten", "bird", "parrot", "horse", "sheep",
            "rabbit", "fish", "pet", "pets",
        ],
        ar: &["كلب", "قط", "قطة", "طائر", "حصان", "خروف", "أرنب"],
    },
    LexiconEntry {
        id: "sport",
        fr: &[
            "sport", "vélo", "velo", "football", "fitness", "musculation", "raquette", "tennis",
            "camping", "ski", "randonnée", "trottinette",
        ],
        en: &[
            "sport", "sports", "bike", "bicycle", "football", "fitness", "gym", "tennis",
            "camping", "ski", "treadmill",
        ],
        ar: &["رياضة", "كرة", "تنس", "لياقة"],
    },
    LexiconEntry {
        id: "fashion",
        fr: &[
            "vêtement", "vetement", "vêtements", "robe", "chemise", "pantalon", "chaussure",
            "chaussures", "sac", "montre", "bijou", "bijoux", "veste", "parfum", "baskets",
        ],
        en: &[
            "clothes", "clothing", "dress", "shirt", "pants", "shoes", "sneakers", "bag",
            "watch", "jewelry", "jacket", "perfume", "skirt",
        ],
        ar: &["ملابس", "فستان", "قميص", "حذاء", "حقيبة", "ساعة", "عطر"],
    },
    LexiconEntry {
        id: "home_garden",
        fr: &[
            "meuble", "meubles", "canapé", "canape", "table", "chaise", "lit", "armoire",
            "cuisine", "frigo", "réfrigérateur", "climatiseur", "jardin", "décoration", "tapis",
        ],
        en: &[
            "furniture", "sofa", "table", "chair", "bed", "wardrobe", "kitchen", "fridge",
            "washer", "garden", "decor", "carpet",
        ],
        ar: &["أثاث", "كنبة", "طاولة", "كرسي", "سرير", "مطبخ", "ثلاجة", "حديقة"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_logical_id_has_a_slug() {
        for entry in LEXICON {
            assert!(slug_for(entry.id).is_some(), "no slug for {}", entry.id);
        }
    }

    #[test]
    fn test_every_entry_covers_all_languages() {
        for entry in LEXICON {
            for lang in Language::ALL {
                assert!(!entry.keywords(lang).is_empty(), "{} has no {} keywords", entry.id, lang);
            }
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for entry in LEXICON {
            for lang in Language::ALL {
                for kw in entry.keywords(lang) {
                    assert_eq!(*kw, kw.to_lowercase(), "{} is not lowercase", kw);
                }
            }
        }
    }

    #[test]
    fn test_missing_language_falls_back_to_french() {
        let entry = LexiconEntry {
            id: "boats",
            fr: &["bateau"],
            en: &[],
            ar: &[],
        };
        assert_eq!(entry.keywords(Language::En), &["bateau"]);
    }
}
