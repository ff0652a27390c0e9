//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the two external collaborators of the service:
//! the catalog store and the session-scoped cart storage. Implementations
//! live in `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`BookRepository`] - Read-only catalog queries
//! - [`CartStorage`] - Per-session cart blobs
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod book_repository;
pub mod cart_storage;

pub use book_repository::BookRepository;
pub use cart_storage::{CartStorage, CartStorageError, CartStorageResult};

#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use cart_storage::MockCartStorage;
