//! Read projections
//!
//! The shape books take on the way out: id, name, year and the id + name
//! of each associated category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{Book, BookId, Category, CategoryId};

/// Category as embedded in a book projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// Book projection returned by reads and by create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookView {
    pub id: BookId,
    pub name: String,
    pub year: i32,
    pub categories: Vec<CategoryView>,
}

impl BookView {
    /// Project a book, looking category names up in `categories`.
    ///
    /// Associations whose category is not in the lookup are left out.
    pub fn project(book: &Book, categories: &HashMap<CategoryId, Category>) -> Self {
        Self {
            id: book.id,
            name: book.name.clone(),
            year: book.year,
            categories: book
                .categories
                .iter()
                .filter_map(|bc| categories.get(&bc.category_id))
                .map(CategoryView::from)
                .collect(),
        }
    }
}

/// Index categories by id for projection
pub fn category_lookup(categories: Vec<Category>) -> HashMap<CategoryId, Category> {
    categories.into_iter().map(|c| (c.id, c)).collect()
}
