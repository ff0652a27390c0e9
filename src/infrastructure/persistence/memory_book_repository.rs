//! In-process catalog repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use tokio::sync::RwLock;

use crate::domain::catalog_query::{BookQuery, SortField, SortOrder};
use crate::domain::entities::{Book, BookId};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

/// Catalog held in memory, with the same filter/sort/page semantics as
/// [`super::PgBookRepository`].
#[derive(Default)]
pub struct MemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Adds or replaces a book by id.
    pub async fn upsert(&self, book: Book) {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| b.book_id == book.book_id) {
            Some(existing) => *existing = book,
            None => books.push(book),
        }
    }
}

fn compare(a: &Book, b: &Book, field: SortField, order: SortOrder) -> Ordering {
    let primary = match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Price => a.price.cmp(&b.price),
    };

    let primary = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };

    primary.then_with(|| a.book_id.cmp(&b.book_id))
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn list(&self, query: &BookQuery) -> Result<Vec<Book>, AppError> {
        let books = self.books.read().await;

        let mut matching: Vec<&Book> = books
            .iter()
            .filter(|book| {
                query
                    .category
                    .as_deref()
                    .is_none_or(|category| book.in_category(category))
            })
            .collect();

        matching.sort_by(|a, b| compare(a, b, query.sort_field, query.sort_order));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, AppError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.book_id == book_id).cloned())
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let books = self.books.read().await;

        let mut categories: Vec<String> = books
            .iter()
            .map(|b| b.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        categories.dedup();

        Ok(categories)
    }

    async fn count(&self, category: Option<String>) -> Result<i64, AppError> {
        let books = self.books.read().await;

        let count = books
            .iter()
            .filter(|b| category.as_deref().is_none_or(|c| b.in_category(c)))
            .count();

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn book(id: BookId, title: &str, cents: i64, category: &str) -> Book {
        Book::new(
            id,
            title.to_string(),
            "Author".to_string(),
            "Publisher".to_string(),
            format!("isbn-{id}"),
            "Classification".to_string(),
            category.to_string(),
            100,
            Decimal::new(cents, 2),
        )
    }

    fn repo() -> MemoryBookRepository {
        MemoryBookRepository::new(vec![
            book(1, "beta", 1500, "Drama"),
            book(2, "Alpha", 2500, "Fiction"),
            book(3, "Gamma", 500, "fiction"),
            book(4, "delta", 2500, "Poetry"),
        ])
    }

    #[tokio::test]
    async fn test_title_sort_ignores_case() {
        let books = repo().list(&BookQuery::new(1, 10)).await.unwrap();
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();

        assert_eq!(titles, vec!["Alpha", "beta", "delta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_price_ties_break_on_id() {
        let query = BookQuery::new(1, 10).with_sort_field(SortField::Price, SortOrder::Desc);
        let books = repo().list(&query).await.unwrap();
        let ids: Vec<BookId> = books.iter().map(|b| b.book_id).collect();

        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[tokio::test]
    async fn test_category_filter_ignores_case() {
        let query = BookQuery::new(1, 10).with_category(Some("FICTION"));
        let books = repo().list(&query).await.unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(repo().count(Some("Fiction".to_string())).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let books = repo().list(&BookQuery::new(3, 2)).await.unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = repo();
        repo.upsert(book(1, "Beta revised", 1500, "Drama")).await;
        repo.upsert(book(5, "Epsilon", 100, "Drama")).await;

        assert_eq!(repo.count(None).await.unwrap(), 5);
        assert_eq!(
            repo.find_by_id(1).await.unwrap().unwrap().title,
            "Beta revised"
        );
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let categories = repo().categories().await.unwrap();
        assert_eq!(categories, vec!["Drama", "Fiction", "fiction", "Poetry"]);
    }
}
