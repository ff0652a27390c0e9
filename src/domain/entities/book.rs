//! Book entity representing a catalog record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// A book as held by the catalog store.
///
/// Books are read-only to this service; they are created and edited through
/// store-side administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    pub classification: String,
    pub category: String,
    pub page_count: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Book {
    /// Creates a new Book instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        book_id: BookId,
        title: String,
        author: String,
        publisher: String,
        isbn: String,
        classification: String,
        category: String,
        page_count: i32,
        price: Decimal,
    ) -> Self {
        Self {
            book_id,
            title,
            author,
            publisher,
            isbn,
            classification,
            category,
            page_count,
            price,
        }
    }

    /// Returns true if the book's category equals `category`, ignoring case.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        Book::new(
            7,
            "The Hobbit".to_string(),
            "J.R.R. Tolkien".to_string(),
            "Allen & Unwin".to_string(),
            "978-0261102217".to_string(),
            "Fiction".to_string(),
            "Fantasy".to_string(),
            310,
            Decimal::new(1299, 2),
        )
    }

    #[test]
    fn test_book_creation() {
        let book = sample();

        assert_eq!(book.book_id, 7);
        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.page_count, 310);
        assert_eq!(book.price, Decimal::new(1299, 2));
    }

    #[test]
    fn test_in_category_ignores_case() {
        let book = sample();

        assert!(book.in_category("fantasy"));
        assert!(book.in_category("FANTASY"));
        assert!(!book.in_category("Fantasy Classics"));
    }

    #[test]
    fn test_book_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["bookId"], 7);
        assert_eq!(value["pageCount"], 310);
        assert_eq!(value["isbn"], "978-0261102217");
        assert_eq!(value["price"], json!(12.99));
    }
}
