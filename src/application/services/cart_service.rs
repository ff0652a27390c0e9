//! Session cart service.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::cart_manager::CartManager;
use crate::domain::entities::BookId;
use crate::domain::repositories::{BookRepository, CartStorage};
use crate::error::AppError;
use crate::utils::session_id::generate_session_id;
use serde_json::json;
use tracing::info;

/// Opens per-session [`CartManager`]s and resolves book ids against the
/// catalog before they enter a cart.
///
/// Mutations of one session run one at a time: each holds that session's
/// lock from reading the blob until the new blob is written. The locks are
/// process-local, so instances sharing one Redis do not coordinate.
pub struct CartService {
    storage: Arc<dyn CartStorage>,
    books: Arc<dyn BookRepository>,
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CartService {
    pub fn new(storage: Arc<dyn CartStorage>, books: Arc<dyn BookRepository>) -> Self {
        Self {
            storage,
            books,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Waits for exclusive access to the cart of `session_id`.
    async fn lock_session(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.session_locks.lock().await;
            // Entries only referenced by the map belong to idle sessions.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Starts a new cart session and returns its id.
    ///
    /// Nothing is written until the first mutation.
    pub fn start_session(&self) -> Result<String, AppError> {
        let session_id = generate_session_id()?;
        info!(session_prefix = &session_id[..6], "Cart session started");
        Ok(session_id)
    }

    /// Loads the cart of `session_id`.
    pub async fn open(&self, session_id: &str) -> Result<CartManager, AppError> {
        CartManager::open(self.storage.clone(), session_id).await
    }

    /// Adds one copy of catalog book `book_id` to the session cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book is not in the catalog.
    /// Returns [`AppError::Unavailable`] if cart storage fails.
    pub async fn add_book(&self, session_id: &str, book_id: BookId) -> Result<CartManager, AppError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "book_id": book_id })))?;

        let _guard = self.lock_session(session_id).await;
        let mut cart = self.open(session_id).await?;
        cart.add_to_cart(&book).await?;
        Ok(cart)
    }

    pub async fn remove_book(&self, session_id: &str, book_id: BookId) -> Result<CartManager, AppError> {
        let _guard = self.lock_session(session_id).await;
        let mut cart = self.open(session_id).await?;
        cart.remove_from_cart(book_id).await?;
        Ok(cart)
    }

    /// Sets the quantity of a cart line. Zero or negative removes it.
    pub async fn update_quantity(
        &self,
        session_id: &str,
        book_id: BookId,
        quantity: i64,
    ) -> Result<CartManager, AppError> {
        let _guard = self.lock_session(session_id).await;
        let mut cart = self.open(session_id).await?;
        cart.update_quantity(book_id, quantity).await?;
        Ok(cart)
    }

    pub async fn clear(&self, session_id: &str) -> Result<CartManager, AppError> {
        let _guard = self.lock_session(session_id).await;
        let mut cart = self.open(session_id).await?;
        cart.clear_cart().await?;
        Ok(cart)
    }

    /// Drops the stored cart of `session_id`.
    pub async fn end_session(&self, session_id: &str) -> Result<(), AppError> {
        let _guard = self.lock_session(session_id).await;
        self.open(session_id).await?.end_session().await
    }

    /// Checks that cart storage is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.storage.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Book;
    use crate::domain::repositories::{CartStorageResult, MockBookRepository, MockCartStorage};
    use crate::infrastructure::persistence::MemoryBookRepository;
    use crate::infrastructure::session::MemoryCartStorage;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    /// In-memory storage that hands control back to the scheduler between
    /// reading a blob and returning it, so concurrent callers interleave.
    struct YieldingStorage(MemoryCartStorage);

    #[async_trait]
    impl CartStorage for YieldingStorage {
        async fn get(&self, key: &str) -> CartStorageResult<Option<String>> {
            let blob = self.0.get(key).await?;
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
            Ok(blob)
        }

        async fn set(&self, key: &str, blob: &str) -> CartStorageResult<()> {
            self.0.set(key, blob).await
        }

        async fn remove(&self, key: &str) -> CartStorageResult<()> {
            self.0.remove(key).await
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn create_test_book(id: BookId) -> Book {
        Book::new(
            id,
            format!("Book {id}"),
            "Author".to_string(),
            "Publisher".to_string(),
            format!("isbn-{id}"),
            "Classification".to_string(),
            "Fiction".to_string(),
            120,
            Decimal::new(1250, 2),
        )
    }

    #[tokio::test]
    async fn test_add_book_unknown_id_is_not_found() {
        let mut mock_books = MockBookRepository::new();
        mock_books.expect_find_by_id().returning(|_| Ok(None));

        let mut mock_storage = MockCartStorage::new();
        mock_storage.expect_get().never();
        mock_storage.expect_set().never();

        let service = CartService::new(Arc::new(mock_storage), Arc::new(mock_books));
        let result = service.add_book("session-0000000001", 42).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_book_persists_cart() {
        let mut mock_books = MockBookRepository::new();
        mock_books
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_book(id))));

        let mut mock_storage = MockCartStorage::new();
        mock_storage.expect_get().returning(|_| Ok(None));
        mock_storage
            .expect_set()
            .withf(|key, _| key == "cartItems:session-0000000001")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CartService::new(Arc::new(mock_storage), Arc::new(mock_books));
        let cart = service.add_book("session-0000000001", 3).await.unwrap();

        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn test_end_session_removes_key() {
        let mock_books = MockBookRepository::new();

        let mut mock_storage = MockCartStorage::new();
        mock_storage.expect_get().returning(|_| Ok(None));
        mock_storage
            .expect_remove()
            .withf(|key| key == "cartItems:session-0000000001")
            .times(1)
            .returning(|_| Ok(()));

        let service = CartService::new(Arc::new(mock_storage), Arc::new(mock_books));
        service.end_session("session-0000000001").await.unwrap();
    }

    #[test]
    fn test_start_session_returns_valid_id() {
        let service = CartService::new(
            Arc::new(MockCartStorage::new()),
            Arc::new(MockBookRepository::new()),
        );

        let id = service.start_session().unwrap();
        assert!(crate::utils::session_id::is_valid_session_id(&id));
    }

    #[tokio::test]
    async fn test_concurrent_adds_to_one_session_both_count() {
        let books = Arc::new(MemoryBookRepository::new(vec![create_test_book(1)]));
        let storage = Arc::new(YieldingStorage(MemoryCartStorage::new()));
        let service = Arc::new(CartService::new(storage, books));

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.add_book("session-0000000001", 1).await }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move { service.add_book("session-0000000001", 1).await }
        });

        let mut totals = vec![
            first.await.unwrap().unwrap().total_items(),
            second.await.unwrap().unwrap().total_items(),
        ];
        totals.sort_unstable();
        assert_eq!(totals, vec![1, 2]);

        let cart = service.open("session-0000000001").await.unwrap();
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::new(2500, 2));
    }

    #[tokio::test]
    async fn test_idle_session_locks_are_dropped() {
        let books = Arc::new(MemoryBookRepository::new(vec![create_test_book(1)]));
        let service = CartService::new(Arc::new(MemoryCartStorage::new()), books);

        service.add_book("session-0000000001", 1).await.unwrap();
        service.add_book("session-0000000002", 1).await.unwrap();
        drop(service.lock_session("session-0000000003").await);

        assert_eq!(service.session_locks.lock().await.len(), 1);
    }
}
