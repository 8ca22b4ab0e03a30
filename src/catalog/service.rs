//! Book service
//!
//! Validates incoming book data, resolves category ids and computes the
//! association set to persist. The store handle is borrowed per call;
//! the service holds no state of its own.

use crate::observability::{log_event_with_fields, Event};
use crate::storage::{CatalogStore, StoreError};

use super::errors::{CatalogError, CatalogResult};
use super::projection::{category_lookup, BookView};
use super::types::{Book, BookDraft, BookId, BookInput};
use super::validator::{resolve_categories, validate_fields, validate_year, Clock, SystemClock};

/// Book operations over a borrowed store
pub struct BookService<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    clock: &'a dyn Clock,
}

impl<'a, S: CatalogStore + ?Sized> BookService<'a, S> {
    /// Service using the system clock
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            clock: &SystemClock,
        }
    }

    /// Service using a caller-supplied clock
    pub fn with_clock(store: &'a S, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Run every check and produce the draft to write.
    ///
    /// Order: field constraints, year, then categories.
    fn prepare(&self, input: BookInput) -> CatalogResult<BookDraft> {
        validate_fields(&input.name, input.year)?;
        validate_year(input.year, self.clock.current_year())?;
        let categories = resolve_categories(self.store, &input.category_ids)?;

        Ok(BookDraft::new(input.name, input.year, categories))
    }

    /// Create a book with one association per requested category
    pub fn create(&self, input: BookInput) -> CatalogResult<Book> {
        let result = self
            .prepare(input)
            .and_then(|draft| self.store.insert_book(&draft).map_err(CatalogError::from));

        match &result {
            Ok(book) => {
                let id = book.id.to_string();
                let categories = format!("{:?}", book.category_ids());
                log_event_with_fields(
                    Event::BookCreated,
                    &[("book_id", id.as_str()), ("categories", categories.as_str())],
                );
            }
            Err(err) => observe_failure("create", None, err),
        }

        result
    }

    /// Replace a book's name, year and entire category set.
    ///
    /// The existing association set is discarded, never merged.
    pub fn update(&self, id: BookId, input: BookInput) -> CatalogResult<Book> {
        let result = self.update_inner(id, input);

        match &result {
            Ok(book) => {
                let id = book.id.to_string();
                let version = book.version.to_string();
                log_event_with_fields(
                    Event::BookUpdated,
                    &[("book_id", id.as_str()), ("version", version.as_str())],
                );
            }
            Err(err) => observe_failure("update", Some(id), err),
        }

        result
    }

    fn update_inner(&self, id: BookId, input: BookInput) -> CatalogResult<Book> {
        let existing = self
            .store
            .get_book(id)?
            .ok_or(CatalogError::NotFound(id))?;

        let draft = self.prepare(input)?;

        match self.store.replace_book(id, existing.version, &draft) {
            Ok(book) => Ok(book),
            Err(StoreError::BookNotFound(_)) => Err(CatalogError::NotFound(id)),
            Err(StoreError::VersionConflict { .. }) => {
                // Lost the race; a vanished book is reported as missing
                if self.store.book_exists(id)? {
                    Err(CatalogError::ConcurrentModification(id))
                } else {
                    Err(CatalogError::NotFound(id))
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a book and all of its associations
    pub fn delete(&self, id: BookId) -> CatalogResult<()> {
        let result = match self.store.delete_book(id) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CatalogError::NotFound(id)),
            Err(err) => Err(err.into()),
        };

        match &result {
            Ok(()) => {
                let id = id.to_string();
                log_event_with_fields(Event::BookDeleted, &[("book_id", id.as_str())]);
            }
            Err(err) => observe_failure("delete", Some(id), err),
        }

        result
    }

    /// Fetch one book projection
    pub fn get(&self, id: BookId) -> CatalogResult<BookView> {
        let book = self
            .store
            .get_book(id)?
            .ok_or(CatalogError::NotFound(id))?;
        let lookup = category_lookup(self.store.list_categories()?);

        Ok(BookView::project(&book, &lookup))
    }

    /// Project a book already in hand
    pub fn view(&self, book: &Book) -> CatalogResult<BookView> {
        let lookup = category_lookup(self.store.list_categories()?);
        Ok(BookView::project(book, &lookup))
    }

    /// Project every book
    pub fn list(&self) -> CatalogResult<Vec<BookView>> {
        let books = self.store.list_books()?;
        let lookup = category_lookup(self.store.list_categories()?);

        Ok(books
            .iter()
            .map(|book| BookView::project(book, &lookup))
            .collect())
    }
}

fn observe_failure(operation: &str, id: Option<BookId>, err: &CatalogError) {
    let id = id.map(|id| id.to_string()).unwrap_or_default();
    let reason = err.to_string();
    let fields = [
        ("book_id", id.as_str()),
        ("code", err.code()),
        ("operation", operation),
        ("reason", reason.as_str()),
    ];

    log_event_with_fields(failure_event(err), &fields);
}

fn failure_event(err: &CatalogError) -> Event {
    if !err.is_rejection() {
        Event::StorageFailure
    } else if matches!(err, CatalogError::ConcurrentModification(_)) {
        Event::UpdateConflict
    } else {
        Event::BookRejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validator::FixedClock;
    use crate::storage::MemoryStore;

    const YEAR: i32 = 2024;

    #[test]
    fn test_create_then_get() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        let book = service.create(BookInput::new("Dune", 1965, vec![1, 5])).unwrap();
        let view = service.get(book.id).unwrap();

        assert_eq!(view.name, "Dune");
        let names: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ficção", "Fantasia"]);
    }

    #[test]
    fn test_year_check_precedes_category_check() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        let result = service.create(BookInput::new("Later", YEAR + 1, vec![1, 2, 3, 4]));
        assert!(matches!(result, Err(CatalogError::InvalidYear { .. })));
    }

    #[test]
    fn test_failed_create_leaves_no_book() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        assert!(service.create(BookInput::new("Y", 2000, vec![99])).is_err());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_book_is_not_found_before_validation() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        let result = service.update(10, BookInput::new("", YEAR + 5, vec![99]));
        assert!(matches!(result, Err(CatalogError::NotFound(10))));
    }

    #[test]
    fn test_update_replaces_categories() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        let book = service.create(BookInput::new("Dune", 1965, vec![1, 2])).unwrap();
        let updated = service
            .update(book.id, BookInput::new("Dune", 1965, vec![3]))
            .unwrap();

        assert_eq!(updated.category_ids(), vec![3]);
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn test_failure_event_selection() {
        assert_eq!(
            failure_event(&CatalogError::from(StoreError::LockPoisoned)),
            Event::StorageFailure
        );
        assert_eq!(
            failure_event(&CatalogError::ConcurrentModification(1)),
            Event::UpdateConflict
        );
        assert_eq!(failure_event(&CatalogError::NotFound(1)), Event::BookRejected);
        assert_eq!(
            failure_event(&CatalogError::DuplicateCategory(2)),
            Event::BookRejected
        );
    }

    #[test]
    fn test_delete_twice() {
        let store = MemoryStore::new();
        let clock = FixedClock(YEAR);
        let service = BookService::with_clock(&store, &clock);

        let book = service.create(BookInput::new("Dune", 1965, vec![])).unwrap();
        service.delete(book.id).unwrap();
        assert!(matches!(service.delete(book.id), Err(CatalogError::NotFound(_))));
        assert!(matches!(service.get(book.id), Err(CatalogError::NotFound(_))));
    }
}
