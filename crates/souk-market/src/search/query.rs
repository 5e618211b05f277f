//! Phase A: the structured listing-store query.

use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;
use crate::listing::{Listing, ListingKind};

/// Query over the fields the store filters natively.
///
/// Attribute facets never appear here: the store does not index the
/// attributes bag, so the result is a superset refined in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Free-text search term (may be empty).
    pub text: String,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<CategoryId>,
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// `None` means any kind.
    pub kind: Option<ListingKind>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into().trim().to_string();
        self
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn with_subcategory(mut self, id: impl Into<CategoryId>) -> Self {
        self.subcategory_id = Some(id.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_sub_region(mut self, sub_region: impl Into<String>) -> Self {
        self.sub_region = Some(sub_region.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_kind(mut self, kind: Option<ListingKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Whether a listing satisfies the query, with SQL semantics: only active
    /// listings, and a null price fails any price bound.
    pub fn matches(&self, listing: &Listing) -> bool {
        if !listing.is_active() {
            return false;
        }
        if !self.text.is_empty() && !listing.mentions(&self.text) {
            return false;
        }
        if let Some(category) = &self.category_id {
            if &listing.category_id != category {
                return false;
            }
        }
        if let Some(subcategory) = &self.subcategory_id {
            if listing.subcategory_id.as_ref() != Some(subcategory) {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if !eq_opt(listing.location.region.as_deref(), region) {
                return false;
            }
        }
        if let Some(sub_region) = &self.sub_region {
            if !eq_opt(listing.location.sub_region.as_deref(), sub_region) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if !listing.price.map_or(false, |p| p >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if !listing.price.map_or(false, |p| p <= max) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if listing.kind != kind {
                return false;
            }
        }
        true
    }

    /// Build a parameterized SQL WHERE clause for SQL-backed stores.
    pub fn build_where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = vec!["status = ?".to_string()];
        let mut values = vec!["active".to_string()];

        if !self.text.is_empty() {
            clauses.push("(title LIKE ? OR description LIKE ?)".to_string());
            values.push(format!("%{}%", self.text));
            values.push(format!("%{}%", self.text));
        }
        if let Some(id) = &self.category_id {
            clauses.push("category_id = ?".to_string());
            values.push(id.as_str().to_string());
        }
        if let Some(id) = &self.subcategory_id {
            clauses.push("subcategory_id = ?".to_string());
            values.push(id.as_str().to_string());
        }
        if let Some(region) = &self.region {
            clauses.push("region = ?".to_string());
            values.push(region.clone());
        }
        if let Some(sub_region) = &self.sub_region {
            clauses.push("sub_region = ?".to_string());
            values.push(sub_region.clone());
        }
        if let Some(min) = self.min_price {
            clauses.push("price >= ?".to_string());
            values.push(min.to_string());
        }
        if let Some(max) = self.max_price {
            clauses.push("price <= ?".to_string());
            values.push(max.to_string());
        }
        if let Some(kind) = self.kind {
            clauses.push("listing_type = ?".to_string());
            values.push(kind.as_str().to_string());
        }

        (clauses.join(" AND "), values)
    }

    /// Build the full SQL query, newest first.
    pub fn build_sql(&self) -> (String, Vec<String>) {
        let (where_clause, values) = self.build_where_clause();
        let sql = format!(
            "SELECT * FROM listings WHERE {} ORDER BY created_at DESC",
            where_clause
        );
        (sql, values)
    }
}

fn eq_opt(actual: Option<&str>, expected: &str) -> bool {
    actual.map_or(false, |a| a.eq_ignore_ascii_case(expected))
}
