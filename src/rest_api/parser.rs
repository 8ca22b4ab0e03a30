//! # Request Parsing
//!
//! Request bodies and path parameters for the `/books` endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::{BookId, BookInput, CategoryId};

use super::errors::{RestError, RestResult};

/// Body of `POST /books` and `PUT /books/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

impl From<BookRequest> for BookInput {
    fn from(req: BookRequest) -> Self {
        BookInput::new(req.name, req.year, req.category_ids)
    }
}

/// Parse a `{id}` path segment
pub fn parse_book_id(raw: &str) -> RestResult<BookId> {
    raw.parse::<BookId>()
        .map_err(|_| RestError::InvalidPath(format!("'{}' is not a book id", raw)))
}
