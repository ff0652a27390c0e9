//! Catalog query service.

use std::sync::Arc;

use crate::domain::catalog_query::BookQuery;
use crate::domain::entities::{Book, BookId};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::debug;

/// Read-only access to the book catalog.
///
/// Each call issues exactly one repository query; nothing is cached
/// between calls.
pub struct CatalogService {
    repository: Arc<dyn BookRepository>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Returns one page of books matching `query`.
    ///
    /// Pages past the end of the result set are empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the catalog store fails.
    pub async fn list_books(&self, query: BookQuery) -> Result<Vec<Book>, AppError> {
        debug!(
            page = query.page,
            page_size = query.page_size,
            sort = %query.sort_field,
            order = %query.sort_order,
            category = query.category.as_deref(),
            "Listing books"
        );

        let books = self.repository.list(&query).await?;

        metrics::counter!(
            "catalog_queries_total",
            "filtered" => if query.category.is_some() { "true" } else { "false" }
        )
        .increment(1);

        Ok(books)
    }

    /// Retrieves a single book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no book has this id.
    pub async fn get_book(&self, book_id: BookId) -> Result<Book, AppError> {
        self.repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "book_id": book_id })))
    }

    /// Distinct non-empty categories, ordered case-insensitively.
    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        self.repository.categories().await
    }

    /// Number of books, optionally within one category.
    pub async fn count_books(&self, category: Option<String>) -> Result<i64, AppError> {
        self.repository.count(category).await
    }
}
