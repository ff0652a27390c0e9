//! Paged book list state with stale-response protection.

use tracing::warn;

use crate::browse::generation::{Generation, RequestGeneration};
use crate::domain::catalog_query::{BookQuery, DEFAULT_PAGE_SIZE, SortField, SortOrder};
use crate::domain::entities::Book;
use crate::error::AppError;

/// Page sizes offered to the user.
pub const PAGE_SIZE_CHOICES: [u32; 3] = [5, 10, 20];

/// Message shown when a catalog fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch books. Please try again later.";

/// A catalog fetch in flight.
///
/// Hand `query` to the catalog and pass the ticket back to
/// [`BookListState::complete`] together with the outcome.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: Generation,
    pub query: BookQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// State behind a paged, title-sorted book list.
#[derive(Debug)]
pub struct BookListState {
    page: u32,
    page_size: u32,
    sort_order: SortOrder,
    category: Option<String>,
    books: Vec<Book>,
    loading: bool,
    error: Option<String>,
    generations: RequestGeneration,
}

impl Default for BookListState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookListState {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_order: SortOrder::Asc,
            category: None,
            books: Vec::new(),
            loading: false,
            error: None,
            generations: RequestGeneration::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// The query matching the current view settings.
    pub fn query(&self) -> BookQuery {
        BookQuery::new(self.page, self.page_size)
            .with_sort_field(SortField::Title, self.sort_order)
            .with_category(self.category.as_deref())
    }

    /// Marks the list as loading and issues a ticket for the current query.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.error = None;

        FetchTicket {
            generation: self.generations.next(),
            query: self.query(),
        }
    }

    /// Applies the outcome of a fetch.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` has been
    /// superseded by a later [`begin_fetch`](Self::begin_fetch).
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Book>, AppError>) -> bool {
        if !self.generations.is_current(ticket.generation) {
            return false;
        }

        self.loading = false;
        match result {
            Ok(books) => {
                self.books = books;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, page = self.page, "Error fetching books");
                self.books.clear();
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }

        true
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Changes the page size and returns to the first page.
    ///
    /// A size of zero is ignored.
    pub fn set_page_size(&mut self, page_size: u32) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.page = 1;
    }

    /// Changes the category filter and returns to the first page.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.trim().is_empty());
        self.page = 1;
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggled();
    }
}
