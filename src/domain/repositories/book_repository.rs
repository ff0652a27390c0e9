//! Repository trait for catalog data access.

use crate::domain::catalog_query::BookQuery;
use crate::domain::entities::{Book, BookId};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the catalog store.
///
/// Implementations must apply the category filter, then the ordering from
/// [`BookQuery`] (ties broken by ascending book id), then offset/limit.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryBookRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Returns one page of books matching `query`.
    ///
    /// A page past the end of the data is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, query: &BookQuery) -> Result<Vec<Book>, AppError>;

    /// Finds a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, AppError>;

    /// Lists distinct categories, ordered case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn categories(&self) -> Result<Vec<String>, AppError>;

    /// Counts books, optionally filtered by category (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, category: Option<String>) -> Result<i64, AppError>;
}
