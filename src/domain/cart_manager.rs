//! Per-session cart state machine with write-through persistence.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Book, BookId, CartCollection, CartItem};
use crate::domain::repositories::CartStorage;
use crate::error::AppError;

/// Prefix of the storage key holding a session's cart.
pub const CART_KEY_PREFIX: &str = "cartItems";

/// Storage key for the cart of `session_id`.
pub fn cart_key(session_id: &str) -> String {
    format!("{CART_KEY_PREFIX}:{session_id}")
}

/// Cart operations for exactly one session.
///
/// Constructed with [`CartManager::open`], which rehydrates the cart from
/// storage. Every mutation writes the whole collection back before
/// returning. An unreadable blob is discarded and the session starts over
/// with an empty cart.
pub struct CartManager {
    storage: Arc<dyn CartStorage>,
    key: String,
    cart: CartCollection,
}

impl CartManager {
    /// Opens the cart of `session_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the storage backend cannot be read.
    /// A missing or corrupt blob is not an error.
    pub async fn open(storage: Arc<dyn CartStorage>, session_id: &str) -> Result<Self, AppError> {
        let key = cart_key(session_id);

        let cart = match storage.get(&key).await? {
            None => {
                debug!(key, "No stored cart, starting empty");
                CartCollection::new()
            }
            Some(blob) => match CartCollection::from_blob(&blob) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, key, "Discarding unreadable cart blob");
                    CartCollection::new()
                }
            },
        };

        Ok(Self { storage, key, cart })
    }

    pub fn cart(&self) -> &CartCollection {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Adds one copy of `book`, merging with an existing line.
    pub async fn add_to_cart(&mut self, book: &Book) -> Result<(), AppError> {
        self.cart.add(book);
        self.persist("add").await
    }

    /// Removes the line for `book_id`; absent ids are ignored.
    pub async fn remove_from_cart(&mut self, book_id: BookId) -> Result<(), AppError> {
        self.cart.remove(book_id);
        self.persist("remove").await
    }

    /// Sets the quantity of `book_id`. Zero or negative removes the line.
    pub async fn update_quantity(&mut self, book_id: BookId, quantity: i64) -> Result<(), AppError> {
        self.cart.set_quantity(book_id, quantity);
        self.persist("update_quantity").await
    }

    pub async fn clear_cart(&mut self) -> Result<(), AppError> {
        self.cart.clear();
        self.persist("clear").await
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Drops the persisted cart for this session.
    pub async fn end_session(self) -> Result<(), AppError> {
        self.storage.remove(&self.key).await?;
        debug!(key = self.key, "Cart session ended");
        Ok(())
    }

    async fn persist(&self, op: &'static str) -> Result<(), AppError> {
        let blob = self.cart.to_blob().map_err(|e| {
            AppError::internal("Failed to serialize cart", json!({ "reason": e.to_string() }))
        })?;

        self.storage.set(&self.key, &blob).await?;
        metrics::counter!("cart_mutations_total", "op" => op).increment(1);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{CartStorageError, MockCartStorage};
    use mockall::predicate::eq;

    fn book(id: BookId, cents: i64) -> Book {
        Book::new(
            id,
            format!("Book {id}"),
            "Author".to_string(),
            "Publisher".to_string(),
            format!("isbn-{id}"),
            "Fiction".to_string(),
            "Fiction".to_string(),
            100,
            Decimal::new(cents, 2),
        )
    }

    fn storage_with(blob: Option<String>) -> MockCartStorage {
        let mut storage = MockCartStorage::new();
        storage
            .expect_get()
            .with(eq("cartItems:session-1"))
            .times(1)
            .returning(move |_| Ok(blob.clone()));
        storage
    }

    #[tokio::test]
    async fn test_open_without_blob_starts_empty() {
        let storage = storage_with(None);

        let manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();

        assert!(manager.items().is_empty());
        assert_eq!(manager.total_items(), 0);
        assert_eq!(manager.total_price(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_open_rehydrates_stored_cart() {
        let mut stored = CartCollection::new();
        stored.add(&book(1, 1000));
        stored.add(&book(1, 1000));
        let storage = storage_with(Some(stored.to_blob().unwrap()));

        let manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();

        assert_eq!(manager.cart(), &stored);
        assert_eq!(manager.total_items(), 2);
    }

    #[tokio::test]
    async fn test_open_with_corrupt_blob_starts_empty() {
        let storage = storage_with(Some("[{\"bookId\": \"oops\"".to_string()));

        let manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();

        assert!(manager.items().is_empty());
    }

    #[tokio::test]
    async fn test_open_surfaces_storage_failure() {
        let mut storage = MockCartStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(CartStorageError::Connection("refused".to_string())));

        let result = CartManager::open(Arc::new(storage), "session-1").await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_add_twice_persists_single_line() {
        let mut storage = storage_with(None);
        storage
            .expect_set()
            .withf(|key, _| key == "cartItems:session-1")
            .times(2)
            .returning(|_, _| Ok(()));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        let a = book(1, 1000);

        manager.add_to_cart(&a).await.unwrap();
        manager.add_to_cart(&a).await.unwrap();

        assert_eq!(manager.items().len(), 1);
        assert_eq!(manager.items()[0].quantity, 2);
        assert_eq!(manager.total_items(), 2);
        assert_eq!(manager.total_price().round_dp(2).to_string(), "20.00");
    }

    #[tokio::test]
    async fn test_persisted_blob_matches_state() {
        let mut storage = storage_with(None);
        storage
            .expect_set()
            .withf(|_, blob| {
                CartCollection::from_blob(blob)
                    .map(|cart| cart.total_items() == 1 && cart.get(9).is_some())
                    .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        manager.add_to_cart(&book(9, 500)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes_and_persists() {
        let mut stored = CartCollection::new();
        stored.add(&book(1, 1000));
        stored.add(&book(2, 250));
        let mut storage = storage_with(Some(stored.to_blob().unwrap()));
        storage.expect_set().times(1).returning(|_, _| Ok(()));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        manager.update_quantity(1, 0).await.unwrap();

        assert!(manager.cart().get(1).is_none());
        assert_eq!(manager.total_items(), 1);
        assert_eq!(manager.total_price(), Decimal::new(250, 2));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let mut stored = CartCollection::new();
        stored.add(&book(1, 1000));
        let mut storage = storage_with(Some(stored.to_blob().unwrap()));
        storage.expect_set().times(1).returning(|_, _| Ok(()));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        manager.remove_from_cart(99).await.unwrap();

        assert_eq!(manager.cart(), &stored);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let mut stored = CartCollection::new();
        stored.add(&book(1, 1000));
        let mut storage = storage_with(Some(stored.to_blob().unwrap()));
        storage
            .expect_set()
            .withf(|_, blob| blob == "[]")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        manager.clear_cart().await.unwrap();

        assert!(manager.items().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let mut storage = storage_with(None);
        storage
            .expect_set()
            .returning(|_, _| Err(CartStorageError::Operation("READONLY".to_string())));

        let mut manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        let result = manager.add_to_cart(&book(1, 100)).await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_end_session_removes_blob() {
        let mut storage = storage_with(None);
        storage
            .expect_remove()
            .with(eq("cartItems:session-1"))
            .times(1)
            .returning(|_| Ok(()));

        let manager = CartManager::open(Arc::new(storage), "session-1").await.unwrap();
        manager.end_session().await.unwrap();
    }
}
