//! # REST API HTTP Server
//!
//! Axum routes for the `/books` endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::catalog::{BookService, BookView, Clock, SystemClock};
use crate::storage::CatalogStore;

use super::errors::{RestError, RestResult};
use super::parser::{parse_book_id, BookRequest};
use super::response::CreatedResponse;

/// REST API server state
pub struct RestServer {
    store: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
}

impl RestServer {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn CatalogStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Book service borrowing this server's store for one request
    fn service(&self) -> BookService<'_, dyn CatalogStore> {
        BookService::with_clock(self.store.as_ref(), self.clock.as_ref())
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/books", get(list_handler).post(create_handler))
            .route(
                "/books/:id",
                get(get_handler).put(update_handler).delete(delete_handler),
            )
            .with_state(state)
    }
}

/// Shared state type
type ServerState = Arc<RestServer>;

fn read_body(body: Result<Json<BookRequest>, JsonRejection>) -> RestResult<BookRequest> {
    body.map(|Json(req)| req)
        .map_err(|rejection| RestError::InvalidBody(rejection.body_text()))
}

/// Run service work on the blocking pool; store calls hold a lock and do disk I/O
async fn run_blocking<T, F>(server: ServerState, context: &'static str, task: F) -> RestResult<T>
where
    F: FnOnce(&BookService<'_, dyn CatalogStore>) -> RestResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || task(&server.service()))
        .await
        .map_err(|err| {
            RestError::Internal(format!("{}: blocking task failed: {}", context, err))
        })?
}

/// List books handler
async fn list_handler(State(server): State<ServerState>) -> RestResult<Json<Vec<BookView>>> {
    let books = run_blocking(server, "list books", |service| Ok(service.list()?)).await?;
    Ok(Json(books))
}

/// Get single book handler
async fn get_handler(
    State(server): State<ServerState>,
    Path(id): Path<String>,
) -> RestResult<Json<BookView>> {
    let id = parse_book_id(&id)?;
    let book = run_blocking(server, "get book", move |service| Ok(service.get(id)?)).await?;
    Ok(Json(book))
}

/// Create book handler
async fn create_handler(
    State(server): State<ServerState>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> RestResult<CreatedResponse> {
    let req = read_body(body)?;

    let view = run_blocking(server, "create book", move |service| {
        let book = service.create(req.into())?;
        Ok(service.view(&book)?)
    })
    .await?;

    Ok(CreatedResponse::new(view))
}

/// Update book handler (full replace)
async fn update_handler(
    State(server): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> RestResult<StatusCode> {
    let id = parse_book_id(&id)?;
    let req = read_body(body)?;

    run_blocking(server, "update book", move |service| {
        service.update(id, req.into())?;
        Ok(())
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete book handler
async fn delete_handler(
    State(server): State<ServerState>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    let id = parse_book_id(&id)?;
    run_blocking(server, "delete book", move |service| Ok(service.delete(id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}
