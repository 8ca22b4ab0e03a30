//! SQLite-backed catalog store.
//!
//! One connection guarded by a mutex. Every trait method runs inside its
//! own transaction so a failed write leaves no partial rows behind.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::catalog::types::{Book, BookCategory, BookDraft, BookId, Category, CategoryId};

use super::errors::{StoreError, StoreResult};
use super::schema::{SCHEMA_SQL, SEED_CATEGORIES};
use super::traits::CatalogStore;

/// Catalog store persisted in a SQLite database
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file, applying the schema and seed rows.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;

        for (id, name) in SEED_CATEGORIES {
            conn.execute(
                "INSERT OR IGNORE INTO categories (id, name) VALUES (?, ?)",
                (id, name),
            )?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn version_from_sql(id: BookId, raw: i64) -> StoreResult<u64> {
        u64::try_from(raw)
            .map_err(|_| StoreError::Corrupt(format!("Book {} has negative version {}", id, raw)))
    }

    fn load_associations(conn: &Connection, book_id: BookId) -> StoreResult<Vec<BookCategory>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT book_id, category_id
            FROM book_categories
            WHERE book_id = ?
            ORDER BY category_id
            "#,
        )?;

        let rows = stmt.query_map([book_id], |row| {
            Ok(BookCategory {
                book_id: row.get(0)?,
                category_id: row.get(1)?,
            })
        })?;

        let mut associations = Vec::new();
        for row in rows {
            associations.push(row?);
        }
        Ok(associations)
    }

    fn load_book(conn: &Connection, id: BookId) -> StoreResult<Option<Book>> {
        let row: Option<(String, i32, i64)> = conn
            .query_row(
                "SELECT name, year, version FROM books WHERE id = ?",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((name, year, version)) = row else {
            return Ok(None);
        };

        Ok(Some(Book {
            id,
            name,
            year,
            version: Self::version_from_sql(id, version)?,
            categories: Self::load_associations(conn, id)?,
        }))
    }

    fn insert_associations(
        conn: &Connection,
        book_id: BookId,
        draft: &BookDraft,
    ) -> StoreResult<()> {
        for association in draft.associations(book_id) {
            conn.execute(
                "INSERT INTO book_categories (book_id, category_id) VALUES (?, ?)",
                (association.book_id, association.category_id),
            )?;
        }
        Ok(())
    }
}

impl CatalogStore for SqliteStore {
    fn find_categories(&self, ids: &[CategoryId]) -> StoreResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock_conn()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name FROM categories WHERE id IN ({}) ORDER BY id",
            placeholders
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    fn list_books(&self) -> StoreResult<Vec<Book>> {
        let conn = self.lock_conn()?;

        let mut associations: BTreeMap<BookId, Vec<BookCategory>> = BTreeMap::new();
        {
            let mut stmt = conn.prepare(
                "SELECT book_id, category_id FROM book_categories ORDER BY book_id, category_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(BookCategory {
                    book_id: row.get(0)?,
                    category_id: row.get(1)?,
                })
            })?;
            for row in rows {
                let association = row?;
                associations
                    .entry(association.book_id)
                    .or_default()
                    .push(association);
            }
        }

        let mut stmt = conn.prepare("SELECT id, name, year, version FROM books ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, BookId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut books = Vec::new();
        for row in rows {
            let (id, name, year, version) = row?;
            books.push(Book {
                id,
                name,
                year,
                version: Self::version_from_sql(id, version)?,
                categories: associations.remove(&id).unwrap_or_default(),
            });
        }
        Ok(books)
    }

    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        let conn = self.lock_conn()?;
        Self::load_book(&conn, id)
    }

    fn book_exists(&self, id: BookId) -> StoreResult<bool> {
        let conn = self.lock_conn()?;
        let found: Option<BookId> = conn
            .query_row("SELECT id FROM books WHERE id = ?", [id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn insert_book(&self, draft: &BookDraft) -> StoreResult<Book> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO books (name, year, version) VALUES (?, ?, 1)",
            (&draft.name, draft.year),
        )?;
        let id = tx.last_insert_rowid();

        Self::insert_associations(&tx, id, draft)?;

        let book = Self::load_book(&tx, id)?.ok_or(StoreError::BookNotFound(id))?;
        tx.commit()?;
        Ok(book)
    }

    fn replace_book(
        &self,
        id: BookId,
        expected_version: u64,
        draft: &BookDraft,
    ) -> StoreResult<Book> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let stored: Option<i64> = tx
            .query_row("SELECT version FROM books WHERE id = ?", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(stored) = stored else {
            return Err(StoreError::BookNotFound(id));
        };
        let found = Self::version_from_sql(id, stored)?;
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: expected_version,
                found,
            });
        }

        tx.execute(
            "UPDATE books SET name = ?, year = ?, version = version + 1 WHERE id = ?",
            (&draft.name, draft.year, id),
        )?;

        // Full replace: drop every existing association, then install the new set
        tx.execute("DELETE FROM book_categories WHERE book_id = ?", [id])?;
        Self::insert_associations(&tx, id, draft)?;

        let book = Self::load_book(&tx, id)?.ok_or(StoreError::BookNotFound(id))?;
        tx.commit()?;
        Ok(book)
    }

    fn delete_book(&self, id: BookId) -> StoreResult<bool> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM book_categories WHERE book_id = ?", [id])?;
        let deleted = tx.execute("DELETE FROM books WHERE id = ?", [id])?;

        tx.commit()?;
        Ok(deleted > 0)
    }
}
