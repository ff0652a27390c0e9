//! Catalog repository implementations.
//!
//! - [`PgBookRepository`] - PostgreSQL `books` table via SQLx
//! - [`MemoryBookRepository`] - In-process catalog for tests and demos

pub mod memory_book_repository;
pub mod pg_book_repository;

pub use memory_book_repository::MemoryBookRepository;
pub use pg_book_repository::PgBookRepository;
