//! # Catalog REST API Module
//!
//! HTTP endpoints for book CRUD. Handlers translate requests into book
//! service calls and map outcomes to status codes.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /books | 200 |
//! | GET | /books/{id} | 200 |
//! | POST | /books | 201 + Location |
//! | PUT | /books/{id} | 204 |
//! | DELETE | /books/{id} | 204 |

pub mod errors;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use parser::BookRequest;
pub use response::CreatedResponse;
pub use server::RestServer;
