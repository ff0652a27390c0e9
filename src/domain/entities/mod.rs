//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; the only logic they carry is the
//! bookkeeping needed to keep their own invariants.
//!
//! # Entity Types
//!
//! - [`Book`] - A catalog record, read-only to this service
//! - [`CartItem`] - A book copied into a cart with a quantity
//! - [`CartCollection`] - The ordered contents of one session's cart

pub mod book;
pub mod cart;

pub use book::{Book, BookId};
pub use cart::{CartBlobError, CartCollection, CartItem};
