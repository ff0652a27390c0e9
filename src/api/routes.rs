//! API route configuration.

use crate::api::handlers::{
    add_cart_item_handler, categories_handler, clear_cart_handler, create_session_handler,
    get_book_handler, get_cart_handler, list_books_handler, remove_cart_item_handler,
    update_cart_item_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Catalog routes. Read-only and open to anonymous clients.
///
/// # Endpoints
///
/// - `GET /books`        - One page of books (`page`, `pageSize`, `sort`, `order`, `category`)
/// - `GET /books/{id}`   - A single book
/// - `GET /categories`   - Distinct categories
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books_handler))
        .route("/books/{id}", get(get_book_handler))
        .route("/categories", get(categories_handler))
}

/// Session and cart routes. Cart endpoints require `X-Session-Id`.
///
/// # Endpoints
///
/// - `POST   /session`              - Issue a new session id
/// - `GET    /cart`                 - Current cart with totals
/// - `DELETE /cart`                 - Empty the cart
/// - `POST   /cart/items`           - Add one copy of a book
/// - `PATCH  /cart/items/{bookId}`  - Set a line's quantity
/// - `DELETE /cart/items/{bookId}`  - Remove a line
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(create_session_handler))
        .route("/cart", get(get_cart_handler).delete(clear_cart_handler))
        .route("/cart/items", post(add_cart_item_handler))
        .route(
            "/cart/items/{book_id}",
            delete(remove_cart_item_handler).patch(update_cart_item_handler),
        )
}
