//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for the catalog store and cart session storage.
//!
//! # Modules
//!
//! - [`persistence`] - Catalog repositories (PostgreSQL and in-memory)
//! - [`session`] - Cart storage backends (Redis and in-memory)

pub mod persistence;
pub mod session;
