//! Book validation and category resolution
//!
//! Checks run in a fixed order: field checks, then the year check, then
//! category resolution. The first failure wins.

use std::collections::HashSet;

use chrono::{Datelike, Utc};

use crate::storage::CatalogStore;

use super::errors::{CatalogError, CatalogResult};
use super::types::{Category, CategoryId, MAX_CATEGORIES_PER_BOOK, MAX_NAME_LEN, MAX_YEAR, MIN_YEAR};

/// Source of the current calendar year
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Wall clock, UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// Clock pinned to one year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Check the stored-field constraints on name and year.
///
/// A name must contain a non-whitespace character and be at most
/// `MAX_NAME_LEN` characters; a year must lie in `MIN_YEAR..=MAX_YEAR`.
pub fn validate_fields(name: &str, year: i32) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::invalid_field("name", "name is required"));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CatalogError::invalid_field(
            "name",
            format!("{} characters exceeds the maximum of {}", len, MAX_NAME_LEN),
        ));
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CatalogError::invalid_field(
            "year",
            format!("{} is outside {}..={}", year, MIN_YEAR, MAX_YEAR),
        ));
    }

    Ok(())
}

/// Reject years later than `current_year`
pub fn validate_year(year: i32, current_year: i32) -> CatalogResult<()> {
    if year > current_year {
        return Err(CatalogError::InvalidYear { year, current_year });
    }
    Ok(())
}

/// Resolve requested category ids to stored categories.
///
/// The count limit is checked before anything else, so an oversized request
/// never reaches the store. Duplicate ids are rejected outright.
pub fn resolve_categories<S>(store: &S, requested: &[CategoryId]) -> CatalogResult<Vec<Category>>
where
    S: CatalogStore + ?Sized,
{
    if requested.len() > MAX_CATEGORIES_PER_BOOK {
        return Err(CatalogError::TooManyCategories {
            requested: requested.len(),
            max: MAX_CATEGORIES_PER_BOOK,
        });
    }

    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(CatalogError::DuplicateCategory(*id));
        }
    }

    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let found = store.find_categories(requested)?;
    if found.len() != requested.len() {
        let known: HashSet<CategoryId> = found.iter().map(|c| c.id).collect();
        let missing = requested
            .iter()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        return Err(CatalogError::UnknownCategory(missing));
    }

    Ok(found)
}
