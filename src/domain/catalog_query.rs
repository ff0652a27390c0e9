//! Catalog query parameters with lenient parsing and documented defaults.

use std::fmt;

/// Default page number (1-based).
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of books per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Column a catalog page is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    Price,
}

impl SortField {
    /// Parses a sort field name, ignoring case. Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    /// SQL column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
        }
    }

    /// SQL expression used in `ORDER BY`. Titles compare case-insensitively.
    pub fn order_expr(self) -> &'static str {
        match self {
            Self::Title => "LOWER(title)",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses `asc`/`desc` ignoring case; anything else is ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// One catalog page request.
///
/// | field        | default  |
/// |--------------|----------|
/// | `page`       | 1        |
/// | `page_size`  | 5        |
/// | `sort_field` | title    |
/// | `sort_order` | asc      |
/// | `category`   | none     |
///
/// The category filter is compared case-insensitively for exact equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub category: Option<String>,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: SortField::Title,
            sort_order: SortOrder::Asc,
            category: None,
        }
    }
}

impl BookQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            ..Self::default()
        }
    }

    /// Applies raw `sort`/`order` strings.
    ///
    /// An unrecognized sort field resets ordering to title ascending,
    /// whatever `order` says.
    pub fn with_sort(mut self, sort: Option<&str>, order: Option<&str>) -> Self {
        let order = order.map(SortOrder::parse_lenient).unwrap_or_default();

        match sort {
            None => {
                self.sort_field = SortField::Title;
                self.sort_order = order;
            }
            Some(raw) => match SortField::parse(raw) {
                Some(field) => {
                    self.sort_field = field;
                    self.sort_order = order;
                }
                None => {
                    self.sort_field = SortField::Title;
                    self.sort_order = SortOrder::Asc;
                }
            },
        }

        self
    }

    pub fn with_sort_field(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = field;
        self.sort_order = order;
        self
    }

    /// Sets the category filter. Blank values clear it.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page.max(1)) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}
