//! Book catalog domain
//!
//! Books, categories and the many-to-many association between them.
//!
//! # Invariants Enforced
//!
//! - A book's year is never later than the current calendar year
//! - A book has at most 3 distinct categories
//! - Every associated category exists when the association is written
//! - Updates replace the association set wholesale

pub mod errors;
pub mod projection;
pub mod service;
pub mod types;
pub mod validator;

pub use errors::{CatalogError, CatalogResult};
pub use projection::{BookView, CategoryView};
pub use service::BookService;
pub use types::{
    Book, BookCategory, BookDraft, BookId, BookInput, Category, CategoryId,
    MAX_CATEGORIES_PER_BOOK, MAX_NAME_LEN, MAX_YEAR, MIN_YEAR,
};
pub use validator::{
    resolve_categories, validate_fields, validate_year, Clock, FixedClock, SystemClock,
};
