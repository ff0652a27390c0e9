//! Query parameters for catalog endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::catalog_query::BookQuery;

/// Query string of `GET /api/books`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers;
/// anything that is not an unsigned integer is rejected with 400.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct BooksQueryParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,

    pub sort: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
}

impl BooksQueryParams {
    /// Converts the raw parameters into a [`BookQuery`].
    ///
    /// # Defaults
    ///
    /// - `page`: 1 (0 is treated as 1)
    /// - `pageSize`: 5 (0 is treated as 5), capped at `max_page_size`
    /// - `sort`/`order`: title ascending; unknown values fall back leniently
    pub fn into_query(self, max_page_size: u32) -> BookQuery {
        let page = self.page.unwrap_or(0);
        let page_size = self.page_size.unwrap_or(0).min(max_page_size.max(1));

        BookQuery::new(page, page_size)
            .with_sort(self.sort.as_deref(), self.order.as_deref())
            .with_category(self.category.as_deref())
    }
}
