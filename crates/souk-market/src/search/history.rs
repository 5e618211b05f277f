//! Search history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, SearchId, UserId};
use crate::search::FilterState;

/// One text search made by a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: SearchId,
    pub user_id: UserId,
    pub query: String,
    /// Category in effect when the search ran, explicit or detected.
    pub category_id: Option<CategoryId>,
    /// Snapshot of the facet selections.
    pub filters: FilterState,
    pub result_count: usize,
    pub created_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    pub fn new(user_id: UserId, query: impl Into<String>) -> Self {
        Self {
            id: SearchId::generate(),
            user_id,
            query: query.into(),
            category_id: None,
            filters: FilterState::new(),
            result_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }
}
