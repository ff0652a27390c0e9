#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use bookstore::api::handlers::health_handler;
use bookstore::domain::entities::{Book, BookId};
use bookstore::domain::repositories::CartStorage;
use bookstore::infrastructure::persistence::MemoryBookRepository;
use bookstore::infrastructure::session::MemoryCartStorage;
use bookstore::routes::api_router;
use bookstore::state::AppState;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

pub const SESSION: &str = "test-session-0000000001";
pub const OTHER_SESSION: &str = "test-session-0000000002";

pub fn book(id: BookId, title: &str, cents: i64, category: &str) -> Book {
    Book::new(
        id,
        title.to_string(),
        format!("Author {id}"),
        "Test Press".to_string(),
        format!("978-0-00-000{id:03}-0"),
        "PZ".to_string(),
        category.to_string(),
        100 + id as i32,
        Decimal::new(cents, 2),
    )
}

/// A(10.00, Fiction), B(20.00, Fiction), C(15.00, Drama) plus a few more
/// titles so that paging has something to split.
pub fn sample_books() -> Vec<Book> {
    vec![
        book(1, "A", 1000, "Fiction"),
        book(2, "B", 2000, "Fiction"),
        book(3, "C", 1500, "Drama"),
        book(4, "d", 500, "Poetry"),
        book(5, "E", 2500, "fiction"),
        book(6, "F", 1200, "Drama"),
        book(7, "g", 800, "Poetry"),
    ]
}

pub fn create_test_state(storage: Arc<dyn CartStorage>) -> AppState {
    AppState::new(
        Arc::new(MemoryBookRepository::new(sample_books())),
        storage,
        10,
    )
}

pub fn create_test_app(storage: Arc<dyn CartStorage>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router())
        .with_state(create_test_state(storage))
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_test_app(Arc::new(MemoryCartStorage::new()))).unwrap()
}

pub async fn insert_book(pool: &PgPool, title: &str, price: Decimal, category: &str) -> BookId {
    sqlx::query_scalar(
        r#"
        INSERT INTO books (title, author, publisher, isbn, classification, category, page_count, price)
        VALUES ($1, 'Author', 'Publisher', 'isbn', 'Classification', $2, 100, $3)
        RETURNING book_id
        "#,
    )
    .bind(title)
    .bind(category)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}
