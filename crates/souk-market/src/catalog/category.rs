//! Category types for listing organization.

use crate::ids::CategoryId;
use crate::locale::{Language, LocalizedText};
use serde::{Deserialize, Serialize};

/// A listing category in the two-level catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Parent category ID (None for root categories).
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Machine slug, used for facet-schema lookup.
    pub slug: String,
    /// Display names.
    pub name: LocalizedText,
    /// Sort order position within parent.
    #[serde(default)]
    pub position: i32,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(id: impl Into<CategoryId>, slug: impl Into<String>, name: LocalizedText) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            slug: slug.into(),
            name,
            position: 0,
        }
    }

    /// Create a new child category.
    pub fn new_child(
        parent: &Category,
        id: impl Into<CategoryId>,
        slug: impl Into<String>,
        name: LocalizedText,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent.id.clone()),
            slug: slug.into(),
            name,
            position: 0,
        }
    }

    /// Set the display position.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this category is a direct child of another.
    pub fn is_child_of(&self, other: &Category) -> bool {
        self.parent_id.as_ref() == Some(&other.id)
    }

    /// Display name in the given language.
    pub fn display_name(&self, lang: Language) -> &str {
        self.name.get(lang)
    }
}
