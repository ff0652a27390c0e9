//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CartService, CatalogService};
use crate::domain::repositories::{BookRepository, CartStorage};

/// Cloned per request by axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub cart_service: Arc<CartService>,
    /// Upper bound applied to the `pageSize` query parameter.
    pub max_page_size: u32,
}

impl AppState {
    /// Wires both services over the given backends.
    pub fn new(
        books: Arc<dyn BookRepository>,
        cart_storage: Arc<dyn CartStorage>,
        max_page_size: u32,
    ) -> Self {
        Self {
            catalog_service: Arc::new(CatalogService::new(books.clone())),
            cart_service: Arc::new(CartService::new(cart_storage, books)),
            max_page_size,
        }
    }
}
