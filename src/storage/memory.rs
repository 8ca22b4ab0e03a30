//! In-memory catalog store
//!
//! Used by tests and when no database path is configured. A single
//! `RwLock` guards all tables, so each method is trivially atomic.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::types::{Book, BookDraft, BookId, Category, CategoryId};

use super::errors::{StoreError, StoreResult};
use super::schema::seed_categories;
use super::traits::CatalogStore;

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    books: BTreeMap<BookId, Book>,
    next_book_id: BookId,
}

/// Catalog store held entirely in memory
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a store seeded with the fixed categories
    pub fn new() -> Self {
        Self::with_categories(seed_categories())
    }

    /// Create a store with a custom category table
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            books: BTreeMap::new(),
            next_book_id: 1,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for MemoryStore {
    fn find_categories(&self, ids: &[CategoryId]) -> StoreResult<Vec<Category>> {
        let tables = self.read()?;
        Ok(tables
            .categories
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let tables = self.read()?;
        Ok(tables.categories.values().cloned().collect())
    }

    fn list_books(&self) -> StoreResult<Vec<Book>> {
        let tables = self.read()?;
        Ok(tables.books.values().cloned().collect())
    }

    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        let tables = self.read()?;
        Ok(tables.books.get(&id).cloned())
    }

    fn book_exists(&self, id: BookId) -> StoreResult<bool> {
        let tables = self.read()?;
        Ok(tables.books.contains_key(&id))
    }

    fn insert_book(&self, draft: &BookDraft) -> StoreResult<Book> {
        let mut tables = self.write()?;

        let id = tables.next_book_id;
        tables.next_book_id += 1;

        let mut categories = draft.associations(id);
        categories.sort_by_key(|bc| bc.category_id);

        let book = Book {
            id,
            name: draft.name.clone(),
            year: draft.year,
            version: 1,
            categories,
        };
        tables.books.insert(id, book.clone());

        Ok(book)
    }

    fn replace_book(
        &self,
        id: BookId,
        expected_version: u64,
        draft: &BookDraft,
    ) -> StoreResult<Book> {
        let mut tables = self.write()?;

        let book = tables
            .books
            .get_mut(&id)
            .ok_or(StoreError::BookNotFound(id))?;

        if book.version != expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: expected_version,
                found: book.version,
            });
        }

        let mut categories = draft.associations(id);
        categories.sort_by_key(|bc| bc.category_id);

        book.name = draft.name.clone();
        book.year = draft.year;
        book.version += 1;
        book.categories = categories;

        Ok(book.clone())
    }

    fn delete_book(&self, id: BookId) -> StoreResult<bool> {
        let mut tables = self.write()?;
        Ok(tables.books.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, year: i32, ids: &[CategoryId]) -> BookDraft {
        let categories = seed_categories()
            .into_iter()
            .filter(|c| ids.contains(&c.id))
            .collect();
        BookDraft::new(name.to_string(), year, categories)
    }

    #[test]
    fn test_seeded_on_construction() {
        let store = MemoryStore::new();
        assert_eq!(store.list_categories().unwrap().len(), 5);
    }

    #[test]
    fn test_find_categories_skips_unknown() {
        let store = MemoryStore::new();
        let found = store.find_categories(&[5, 99, 1]).unwrap();
        let ids: Vec<CategoryId> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert_book(&draft("A", 2000, &[])).unwrap();
        let second = store.insert_book(&draft("B", 2001, &[2])).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.version, 1);
        assert_eq!(second.category_ids(), vec![2]);
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = MemoryStore::new();
        let book = store.insert_book(&draft("A", 2000, &[1])).unwrap();

        let updated = store
            .replace_book(book.id, book.version, &draft("A2", 2001, &[3, 4]))
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.category_ids(), vec![3, 4]);
    }

    #[test]
    fn test_replace_with_stale_version_conflicts() {
        let store = MemoryStore::new();
        let book = store.insert_book(&draft("A", 2000, &[1])).unwrap();
        store
            .replace_book(book.id, 1, &draft("B", 2000, &[]))
            .unwrap();

        let result = store.replace_book(book.id, 1, &draft("C", 2000, &[]));
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_book(42).unwrap());
    }
}
