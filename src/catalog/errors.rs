//! Catalog error types
//!
//! Error codes:
//! - LIBCAT_INVALID_FIELD (REJECT)
//! - LIBCAT_INVALID_YEAR (REJECT)
//! - LIBCAT_TOO_MANY_CATEGORIES (REJECT)
//! - LIBCAT_DUPLICATE_CATEGORY (REJECT)
//! - LIBCAT_UNKNOWN_CATEGORY (REJECT)
//! - LIBCAT_NOT_FOUND (REJECT)
//! - LIBCAT_CONCURRENT_MODIFICATION (REJECT)
//! - LIBCAT_STORAGE (ERROR)

use thiserror::Error;

use crate::storage::StoreError;

use super::types::{BookId, CategoryId};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by the book service
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A book field is missing or out of range
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Year lies in the future
    #[error("Year {year} is later than the current year {current_year}")]
    InvalidYear { year: i32, current_year: i32 },

    /// More categories requested than a book may hold
    #[error("A book may have at most {max} categories ({requested} requested)")]
    TooManyCategories { requested: usize, max: usize },

    /// The same category id appears more than once in a request
    #[error("Category {0} requested more than once")]
    DuplicateCategory(CategoryId),

    /// One or more requested categories do not exist
    #[error("Unknown categories: {}", format_ids(.0))]
    UnknownCategory(Vec<CategoryId>),

    /// No book with this id
    #[error("Book {0} not found")]
    NotFound(BookId),

    /// Another writer updated the book first
    #[error("Book {0} was modified concurrently; re-read and retry")]
    ConcurrentModification(BookId),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StoreError),
}

fn format_ids(ids: &[CategoryId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CatalogError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidField { .. } => "LIBCAT_INVALID_FIELD",
            CatalogError::InvalidYear { .. } => "LIBCAT_INVALID_YEAR",
            CatalogError::TooManyCategories { .. } => "LIBCAT_TOO_MANY_CATEGORIES",
            CatalogError::DuplicateCategory(_) => "LIBCAT_DUPLICATE_CATEGORY",
            CatalogError::UnknownCategory(_) => "LIBCAT_UNKNOWN_CATEGORY",
            CatalogError::NotFound(_) => "LIBCAT_NOT_FOUND",
            CatalogError::ConcurrentModification(_) => "LIBCAT_CONCURRENT_MODIFICATION",
            CatalogError::Storage(_) => "LIBCAT_STORAGE",
        }
    }

    /// True when the caller's request was at fault, as opposed to the store
    pub fn is_rejection(&self) -> bool {
        !matches!(self, CatalogError::Storage(_))
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_lists_ids() {
        let err = CatalogError::UnknownCategory(vec![7, 99]);
        assert_eq!(err.to_string(), "Unknown categories: 7, 99");
    }

    #[test]
    fn test_storage_is_not_a_rejection() {
        let err = CatalogError::from(StoreError::LockPoisoned);
        assert!(!err.is_rejection());
        assert_eq!(err.code(), "LIBCAT_STORAGE");
        assert!(CatalogError::NotFound(1).is_rejection());
    }
}
