//! Storage error types
//!
//! Error codes:
//! - LIBCAT_STORAGE_SQLITE (ERROR)
//! - LIBCAT_STORAGE_VERSION_CONFLICT (REJECT)
//! - LIBCAT_STORAGE_BOOK_NOT_FOUND (REJECT)
//! - LIBCAT_STORAGE_LOCK_POISONED (ERROR)
//! - LIBCAT_STORAGE_CORRUPT (ERROR)

use thiserror::Error;

use crate::catalog::types::BookId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a `CatalogStore`
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored version no longer matches the version the caller read
    #[error("Book {id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        id: BookId,
        expected: u64,
        found: u64,
    },

    /// Book row is gone
    #[error("Book {0} not found")]
    BookNotFound(BookId),

    /// A previous holder of the store lock panicked
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// A stored value could not be mapped back into the catalog model
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Sqlite(_) => "LIBCAT_STORAGE_SQLITE",
            StoreError::VersionConflict { .. } => "LIBCAT_STORAGE_VERSION_CONFLICT",
            StoreError::BookNotFound(_) => "LIBCAT_STORAGE_BOOK_NOT_FOUND",
            StoreError::LockPoisoned => "LIBCAT_STORAGE_LOCK_POISONED",
            StoreError::Corrupt(_) => "LIBCAT_STORAGE_CORRUPT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreError::LockPoisoned.code(), "LIBCAT_STORAGE_LOCK_POISONED");
        assert_eq!(
            StoreError::BookNotFound(3).code(),
            "LIBCAT_STORAGE_BOOK_NOT_FOUND"
        );
    }

    #[test]
    fn test_conflict_display() {
        let err = StoreError::VersionConflict {
            id: 4,
            expected: 1,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Book 4"));
        assert!(msg.contains("expected version 1"));
    }
}
