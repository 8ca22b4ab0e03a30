//! Catalog storage subsystem
//!
//! The book service never talks to a database directly; it is handed a
//! `CatalogStore` on every call.
//!
//! # Implementations
//!
//! - `MemoryStore`: maps behind a lock, seeded on construction
//! - `SqliteStore`: relational tables `books`, `categories` and the
//!   `book_categories` join table
//!
//! # Invariants Enforced
//!
//! - Every write is one transaction
//! - Association rows never outlive their book
//! - Category rows are only ever written by seeding

mod errors;
mod memory;
mod schema;
mod sqlite;
mod traits;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use schema::{seed_categories, SCHEMA_SQL, SEED_CATEGORIES};
pub use sqlite::SqliteStore;
pub use traits::CatalogStore;
