//! Handlers for catalog endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::catalog::BooksQueryParams;
use crate::domain::entities::{Book, BookId};
use crate::error::AppError;
use crate::state::AppState;

/// Returns one page of the catalog.
///
/// # Endpoint
///
/// `GET /api/books`
///
/// # Query Parameters
///
/// - `page` (optional): Page number, 1-based (default: 1)
/// - `pageSize` (optional): Items per page (default: 5, capped at `CATALOG_MAX_PAGE_SIZE`)
/// - `sort` (optional): `title` or `price` (default: `title`)
/// - `order` (optional): `asc` or `desc` (default: `asc`)
/// - `category` (optional): Exact category, compared case-insensitively
///
/// # Response
///
/// A JSON array of books. Pages past the end are empty arrays.
///
/// # Errors
///
/// Returns 400 Bad Request if `page` or `pageSize` is not a number.
pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(params): Query<BooksQueryParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let query = params.into_query(state.max_page_size);
    let books = state.catalog_service.list_books(query).await?;
    Ok(Json(books))
}

/// `GET /api/books/{id}`
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> Result<Json<Book>, AppError> {
    let book = state.catalog_service.get_book(book_id).await?;
    Ok(Json(book))
}

/// `GET /api/categories`
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(categories))
}
