//! UI-agnostic state for paging through the catalog.
//!
//! [`BookListState`] holds what a list view needs (page, page size, sort
//! order, the current books, loading and error flags) and guards against
//! out-of-order responses with a [`RequestGeneration`] counter. The admin
//! CLI drives it for interactive browsing.

pub mod book_list;
pub mod generation;

pub use book_list::{BookListState, FETCH_ERROR_MESSAGE, FetchTicket, PAGE_SIZE_CHOICES};
pub use generation::{Generation, RequestGeneration};
