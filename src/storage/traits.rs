//! Catalog store trait definition.
//!
//! `CatalogStore` is the persistence capability the book service is handed
//! on every call. Each method is one transaction: a write either fully
//! applies or leaves the store as it was.

use crate::catalog::types::{Book, BookDraft, BookId, Category, CategoryId};

use super::errors::StoreResult;

/// Persistence capability for books, categories and their associations.
///
/// Implementations must ensure:
/// - Category rows are never created or altered through this trait
/// - Association rows never outlive their book
/// - Associations are returned in ascending category id order
pub trait CatalogStore: Send + Sync {
    /// Categories whose id appears in `ids`, ascending by id.
    ///
    /// Unknown ids are absent from the result; they are not an error here.
    fn find_categories(&self, ids: &[CategoryId]) -> StoreResult<Vec<Category>>;

    /// All categories, ascending by id
    fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// All books with their associations, ascending by id
    fn list_books(&self) -> StoreResult<Vec<Book>>;

    /// Get a book by ID.
    ///
    /// Returns `Ok(Some(book))` if found, `Ok(None)` if not found.
    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>>;

    /// Whether a book row with this id exists
    fn book_exists(&self, id: BookId) -> StoreResult<bool>;

    /// Insert a new book and one association per draft category.
    ///
    /// Returns the stored book with its assigned id and version 1.
    fn insert_book(&self, draft: &BookDraft) -> StoreResult<Book>;

    /// Replace a book's name, year and entire association set.
    ///
    /// # Errors
    ///
    /// - `StoreError::BookNotFound` if the book row is gone
    /// - `StoreError::VersionConflict` if the stored version is not
    ///   `expected_version`
    fn replace_book(
        &self,
        id: BookId,
        expected_version: u64,
        draft: &BookDraft,
    ) -> StoreResult<Book>;

    /// Delete a book and all of its associations.
    ///
    /// Returns `false` when no such book existed.
    fn delete_book(&self, id: BookId) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CatalogStore) {}
    }
}
