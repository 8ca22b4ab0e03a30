//! Catalog data model
//!
//! A `Book` owns its category associations as an explicit collection.
//! Updates replace that collection wholesale; nothing here diffs old
//! against new.

use serde::{Deserialize, Serialize};

/// Book identifier (assigned by the store)
pub type BookId = i64;

/// Category identifier (fixed at seed time)
pub type CategoryId = i64;

/// Maximum number of categories a book may be associated with
pub const MAX_CATEGORIES_PER_BOOK: usize = 3;

/// Maximum length of a book or category name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// Smallest storable year
pub const MIN_YEAR: i32 = 1;

/// Largest storable year
pub const MAX_YEAR: i32 = 9999;

/// A named tag a book can belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One book's membership in one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookCategory {
    pub book_id: BookId,
    pub category_id: CategoryId,
}

/// A persisted book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub year: i32,
    /// Optimistic concurrency token, bumped on every update
    pub version: u64,
    /// Associations, ascending by category id
    pub categories: Vec<BookCategory>,
}

impl Book {
    /// Category ids of this book's associations, in stored order
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|bc| bc.category_id).collect()
    }
}

/// Caller-supplied book fields, as received on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub name: String,
    pub year: i32,
    pub category_ids: Vec<CategoryId>,
}

impl BookInput {
    pub fn new(name: impl Into<String>, year: i32, category_ids: Vec<CategoryId>) -> Self {
        Self {
            name: name.into(),
            year,
            category_ids,
        }
    }
}

/// Validated book contents ready to be written.
///
/// Stores trust that every category in a draft exists; the book service
/// resolves them against the category table before building one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub name: String,
    pub year: i32,
    pub categories: Vec<Category>,
}

impl BookDraft {
    pub fn new(name: String, year: i32, categories: Vec<Category>) -> Self {
        Self {
            name,
            year,
            categories,
        }
    }

    /// Build the association set this draft installs for `book_id`
    pub fn associations(&self, book_id: BookId) -> Vec<BookCategory> {
        self.categories
            .iter()
            .map(|category| BookCategory {
                book_id,
                category_id: category.id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_associations_follow_categories() {
        let draft = BookDraft::new(
            "Dune".to_string(),
            1965,
            vec![Category::new(1, "Ficção"), Category::new(5, "Fantasia")],
        );

        let associations = draft.associations(7);
        assert_eq!(
            associations,
            vec![
                BookCategory { book_id: 7, category_id: 1 },
                BookCategory { book_id: 7, category_id: 5 },
            ]
        );
    }

    #[test]
    fn test_category_ids() {
        let book = Book {
            id: 1,
            name: "Dune".to_string(),
            year: 1965,
            version: 1,
            categories: vec![
                BookCategory { book_id: 1, category_id: 2 },
                BookCategory { book_id: 1, category_id: 4 },
            ],
        };
        assert_eq!(book.category_ids(), vec![2, 4]);
    }
}
