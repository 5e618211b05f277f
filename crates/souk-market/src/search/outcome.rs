//! Result of one filtering pass.

use serde::Serialize;
use souk_observability::FilterMetrics;

use crate::listing::Listing;
use crate::search::ActiveCategory;

/// What a filtering pass hands back to the panel.
///
/// A failed store query is reported through `error`, never as an `Err`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub listings: Vec<Listing>,
    /// Category the pass filtered by, if any.
    pub category: Option<ActiveCategory>,
    /// Whether `category` came from text detection rather than a selection.
    pub detected: bool,
    /// Store failure message; `listings` is empty when set.
    pub error: Option<String>,
    /// Generation of the request that produced this outcome.
    pub generation: u64,
    pub metrics: FilterMetrics,
}

impl SearchOutcome {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
