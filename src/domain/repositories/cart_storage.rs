//! Session-scoped key-value storage for persisted carts.

use async_trait::async_trait;

/// Errors raised by cart storage backends.
#[derive(Debug, thiserror::Error)]
pub enum CartStorageError {
    #[error("cart storage connection error: {0}")]
    Connection(String),

    #[error("cart storage operation error: {0}")]
    Operation(String),
}

/// Result type for cart storage operations.
pub type CartStorageResult<T> = Result<T, CartStorageError>;

/// Key-value capability holding one serialized cart per session key.
///
/// Entries are expected to disappear when the session ends; backends with
/// native expiry (Redis) apply the session TTL on every write.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisCartStorage`] - Redis with TTL
/// - [`crate::infrastructure::session::MemoryCartStorage`] - In-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the blob stored under `key`.
    async fn get(&self, key: &str) -> CartStorageResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    async fn set(&self, key: &str, blob: &str) -> CartStorageResult<()>;

    /// Deletes the blob stored under `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> CartStorageResult<()>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> bool;
}
