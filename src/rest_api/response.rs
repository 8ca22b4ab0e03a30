//! # Response Formatting
//!
//! Success responses for the `/books` endpoints.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::catalog::BookView;

/// `201 Created` with a `Location` header pointing at the new book
#[derive(Debug, Clone)]
pub struct CreatedResponse {
    pub book: BookView,
}

impl CreatedResponse {
    pub fn new(book: BookView) -> Self {
        Self { book }
    }

    /// Path of the created resource
    pub fn location(&self) -> String {
        format!("/books/{}", self.book.id)
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        let location = self.location();
        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(self.book),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_response_headers() {
        let view = BookView {
            id: 12,
            name: "Dune".to_string(),
            year: 1965,
            categories: Vec::new(),
        };

        let response = CreatedResponse::new(view).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/books/12");
    }
}
