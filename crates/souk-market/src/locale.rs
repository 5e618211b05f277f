//! Supported interface languages.

use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the marketplace is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French, the reference language of every table.
    #[default]
    Fr,
    /// English.
    En,
    /// Arabic.
    Ar,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Ar];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(MarketError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// A display string in the three published languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocalizedText {
    pub fr: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

impl LocalizedText {
    /// Create a localized string.
    pub fn new(fr: impl Into<String>, en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Text for `lang`, falling back to French when the translation is missing.
    pub fn get(&self, lang: Language) -> &str {
        let text = match lang {
            Language::Fr => &self.fr,
            Language::En => &self.en,
            Language::Ar => &self.ar,
        };
        if text.is_empty() {
            &self.fr
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" ar ".parse::<Language>().unwrap(), Language::Ar);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_localized_fallback() {
        let name = LocalizedText::new("Véhicules", "", "مركبات");
        assert_eq!(name.get(Language::En), "Véhicules");
        assert_eq!(name.get(Language::Ar), "مركبات");
    }
}
