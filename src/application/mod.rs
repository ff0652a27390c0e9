//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services consume repository traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::catalog_service::CatalogService`] - Paged, sorted, filtered catalog queries
//! - [`services::cart_service::CartService`] - Per-session cart operations

pub mod services;
