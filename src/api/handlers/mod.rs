//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod books;
pub mod cart;
pub mod health;
pub mod session;

pub use books::{categories_handler, get_book_handler, list_books_handler};
pub use cart::{
    add_cart_item_handler, clear_cart_handler, get_cart_handler, remove_cart_item_handler,
    update_cart_item_handler,
};
pub use health::health_handler;
pub use session::create_session_handler;
