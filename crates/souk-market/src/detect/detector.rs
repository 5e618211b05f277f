//! Keyword-overlap category detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::lexicon::{self, LexiconEntry, LEXICON};
use crate::locale::Language;

/// Scoring weights and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Score for a word equal to a keyword.
    pub exact_weight: u32,
    /// Score for a word containing, or contained in, a keyword.
    pub partial_weight: u32,
    /// Minimum winning score. The default lets one partial match through.
    pub min_score: u32,
    /// Queries with fewer trimmed characters are not scored.
    pub min_query_chars: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            exact_weight: 10,
            partial_weight: 5,
            min_score: 5,
            min_query_chars: 2,
        }
    }
}

/// Accumulated score of one logical category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub id: &'static str,
    pub score: u32,
}

/// Infers a logical category from a free-text query.
#[derive(Debug, Clone)]
pub struct CategoryDetector {
    lexicon: Vec<LexiconEntry>,
    config: DetectorConfig,
}

impl CategoryDetector {
    /// Detector over the compiled-in lexicon.
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_lexicon(LEXICON.to_vec(), config)
    }

    pub fn with_lexicon(lexicon: Vec<LexiconEntry>, config: DetectorConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Best-matching logical category id, or `None` when the query is too
    /// short or no category reaches `min_score`.
    ///
    /// Ties go to the lexicographically smallest logical id.
    pub fn detect(&self, query: &str, lang: Language) -> Option<&'static str> {
        let best = self
            .scores(query, lang)
            .into_iter()
            .next()
            .filter(|s| s.score >= self.config.min_score && s.score > 0)?;
        debug!(query, lang = %lang, category = best.id, score = best.score, "category detected");
        Some(best.id)
    }

    /// Store slug of the detected category.
    pub fn detect_slug(&self, query: &str, lang: Language) -> Option<&'static str> {
        self.detect(query, lang).and_then(lexicon::slug_for)
    }

    /// Scores of every category, best first, ties by ascending id.
    /// Empty when the query is shorter than `min_query_chars`.
    pub fn scores(&self, query: &str, lang: Language) -> Vec<CategoryScore> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_chars {
            return Vec::new();
        }

        let lowered = query.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        let mut scores: Vec<CategoryScore> = self
            .lexicon
            .iter()
            .map(|entry| CategoryScore {
                id: entry.id,
                score: self.score_entry(&words, entry.keywords(lang)),
            })
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(b.id)));
        scores
    }

    fn score_entry(&self, words: &[&str], keywords: &[&str]) -> u32 {
        let mut score = 0;
        for word in words {
            for keyword in keywords {
                if word == keyword {
                    score += self.config.exact_weight;
                } else if word.contains(keyword) || keyword.contains(word) {
                    score += self.config.partial_weight;
                }
            }
        }
        score
    }
}

impl Default for CategoryDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Detect with the default lexicon and weights.
pub fn detect(query: &str, lang: Language) -> Option<&'static str> {
    CategoryDetector::default().detect(query, lang)
}
