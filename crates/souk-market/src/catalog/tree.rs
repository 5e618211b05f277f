//! In-memory snapshot of the category tree.

use std::collections::HashMap;

use crate::catalog::Category;
use crate::ids::CategoryId;

/// Read-only category tree loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryTree {
    /// Build a tree from a flat list of categories.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { categories, index }
    }

    /// Find a category by id.
    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.index.get(id).map(|&i| &self.categories[i])
    }

    /// Find a category by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Parent of a category, if it has one and the parent is loaded.
    pub fn parent_of(&self, category: &Category) -> Option<&Category> {
        category.parent_id.as_ref().and_then(|p| self.get(p))
    }

    /// Root categories in display order.
    pub fn roots(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_root())
    }

    /// Direct children of a category in display order.
    pub fn children(&self, id: &CategoryId) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    fn tree() -> CategoryTree {
        let vehicles = Category::new_root("1", "vehicules", LocalizedText::default()).with_position(2);
        let estate = Category::new_root("2", "immobilier", LocalizedText::default()).with_position(1);
        let cars = Category::new_child(&vehicles, "10", "voitures", LocalizedText::default());
        let motos = Category::new_child(&vehicles, "11", "motos", LocalizedText::default());
        CategoryTree::new(vec![cars, vehicles, motos, estate])
    }

    #[test]
    fn test_roots_in_display_order() {
        let tree = tree();
        let slugs: Vec<&str> = tree.roots().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["immobilier", "vehicules"]);
    }

    #[test]
    fn test_parent_and_children() {
        let tree = tree();
        let cars = tree.get(&CategoryId::new("10")).unwrap();
        assert_eq!(tree.parent_of(cars).unwrap().slug, "vehicules");
        assert_eq!(tree.children(&CategoryId::new("1")).len(), 2);
        assert!(tree.children(&CategoryId::new("2")).is_empty());
    }

    #[test]
    fn test_lookup_by_slug() {
        let tree = tree();
        assert_eq!(tree.by_slug("motos").unwrap().id.as_str(), "11");
        assert!(tree.by_slug("bateaux").is_none());
    }
}
