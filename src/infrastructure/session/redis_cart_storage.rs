//! Redis-backed cart storage.

use crate::domain::repositories::{CartStorage, CartStorageError, CartStorageResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Stores one cart blob per session key with a sliding TTL.
///
/// Uses `ConnectionManager` for automatic reconnects. Backend errors are
/// returned to the caller as [`CartStorageError::Operation`].
pub struct RedisCartStorage {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisCartStorage {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - Lifetime of an idle cart, refreshed on every write;
    ///   controlled via `SESSION_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CartStorageError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CartStorageResult<Self> {
        info!(
            "Connecting to Redis at {}",
            crate::config::mask_connection_string(redis_url)
        );

        let client = Client::open(redis_url).map_err(|e| {
            CartStorageError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CartStorageError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CartStorageError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds: ttl_seconds.max(1),
            key_prefix: "bookstore:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CartStorage for RedisCartStorage {
    async fn get(&self, key: &str) -> CartStorageResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let blob = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| {
                warn!("Redis GET error for {}: {}", key, e);
                CartStorageError::Operation(e.to_string())
            })?;

        debug!(key, found = blob.is_some(), "Cart GET");
        Ok(blob)
    }

    async fn set(&self, key: &str, blob: &str) -> CartStorageResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&full_key, blob, self.ttl_seconds)
            .await
            .map_err(|e| {
                warn!("Redis SET error for {}: {}", key, e);
                CartStorageError::Operation(e.to_string())
            })?;

        debug!(key, ttl = self.ttl_seconds, bytes = blob.len(), "Cart SET");
        Ok(())
    }

    async fn remove(&self, key: &str) -> CartStorageResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(&full_key).await.map_err(|e| {
            warn!("Redis DEL error for {}: {}", key, e);
            CartStorageError::Operation(e.to_string())
        })?;

        if deleted > 0 {
            debug!(key, "Cart DEL");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
