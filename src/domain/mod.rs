//! Domain layer containing business entities and logic.
//!
//! Independent of HTTP and storage details: infrastructure plugs in through
//! the traits in [`repositories`].
//!
//! # Architecture
//!
//! - [`entities`] - Books, cart items and the cart collection
//! - [`catalog_query`] - Page/sort/filter parameters for catalog reads
//! - [`cart_manager`] - Session-bound cart operations with persistence
//! - [`repositories`] - Catalog store and cart storage contracts
//!
//! # Cart Flow
//!
//! 1. A handler resolves the session id from the request
//! 2. [`cart_manager::CartManager::open`] loads that session's blob
//! 3. The requested mutation is applied to the in-memory collection
//! 4. The collection is written back through [`repositories::CartStorage`]

pub mod cart_manager;
pub mod catalog_query;
pub mod entities;
pub mod repositories;
