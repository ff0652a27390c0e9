//! PostgreSQL implementation of the catalog repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::catalog_query::BookQuery;
use crate::domain::entities::{Book, BookId};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

/// PostgreSQL repository over the `books` table.
///
/// Sort columns come from a closed enum and are pushed as SQL text; every
/// user-supplied value is bound as a parameter.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn build_list_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(
            "SELECT book_id, title, author, publisher, isbn, classification, category, page_count, price FROM books",
        );

        if let Some(category) = &query.category {
            builder
                .push(" WHERE LOWER(category) = LOWER(")
                .push_bind(category.clone())
                .push(")");
        }

        builder
            .push(" ORDER BY ")
            .push(query.sort_field.order_expr())
            .push(" ")
            .push(query.sort_order.as_sql())
            .push(", book_id ASC LIMIT ")
            .push_bind(query.limit())
            .push(" OFFSET ")
            .push_bind(query.offset());

        builder
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self, query: &BookQuery) -> Result<Vec<Book>, AppError> {
        let mut builder = Self::build_list_query(query);

        let books = builder
            .build_query_as::<Book>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(books)
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id, title, author, publisher, isbn, classification, category, page_count, price
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(book)
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT category
            FROM books
            WHERE category <> ''
            GROUP BY category
            ORDER BY LOWER(category), category
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(categories)
    }

    async fn count(&self, category: Option<String>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM books WHERE ($1::text IS NULL OR LOWER(category) = LOWER($1))",
        )
        .bind(category)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
