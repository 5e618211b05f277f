//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use souk_market::{EngineConfig, Language};
use souk_observability::LogConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog snapshot location.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search behavior.
    #[serde(default)]
    pub search: SearchConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Engine settings derived from the `[search]` section.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_language(self.search.language)
            .with_debounce_ms(self.search.debounce_ms)
            .with_min_score(self.search.min_score)
            .with_history(self.search.record_history)
    }
}

/// Catalog snapshot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON snapshot path, relative to the config file.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Query language for detection.
    #[serde(default)]
    pub language: Language,

    /// Debounce quiet period in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum detection score.
    #[serde(default = "default_min_score")]
    pub min_score: u32,

    /// Record searches made with `--user`.
    #[serde(default)]
    pub record_history: bool,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_score() -> u32 {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            debounce_ms: default_debounce_ms(),
            min_score: default_min_score(),
            record_history: false,
        }
    }
}

/// Generate a default souk.toml config file.
pub fn generate_default_config(catalog: &str) -> String {
    format!(
        r#"# Souk search configuration

[catalog]
path = "{catalog}"

[search]
language = "fr"
debounce_ms = 300
min_score = 5
record_history = false

[logging]
level = "info"
format = "human"
"#,
        catalog = catalog
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use souk_observability::LogFormat;

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("data/catalog.json")).unwrap();
        assert_eq!(config.catalog.path, "data/catalog.json");
        assert_eq!(config.search.language, Language::Fr);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_engine_config_from_search_section() {
        let config: CliConfig = toml::from_str("[search]\nlanguage = \"ar\"\nmin_score = 10\n").unwrap();
        let engine = config.engine_config();
        assert_eq!(engine.language, Language::Ar);
        assert_eq!(engine.detector.min_score, 10);
        assert_eq!(engine.debounce_ms, 300);
        assert!(!engine.record_history);
    }
}
