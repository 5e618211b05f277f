//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detect::DetectorConfig;
use crate::locale::Language;

/// Configuration for a [`FilterEngine`](crate::search::FilterEngine) and the
/// sessions built on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Keyword scoring weights and threshold.
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Quiet period before a text or facet change triggers a search.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Record text searches of signed-in users.
    #[serde(default = "default_true")]
    pub record_history: bool,
    /// Infer a category from the text when none is selected.
    #[serde(default = "default_true")]
    pub detect_category: bool,
    /// Language used for keyword detection.
    #[serde(default)]
    pub language: Language,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            debounce_ms: default_debounce_ms(),
            record_history: true,
            detect_category: true,
            language: Language::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.detector.min_score = min_score;
        self
    }

    pub fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn with_detection(mut self, enabled: bool) -> Self {
        self.detect_category = enabled;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
