//! Session-scoped cart storage backends.
//!
//! - [`RedisCartStorage`] - Production Redis store with per-session TTL
//! - [`MemoryCartStorage`] - In-process fallback for development and tests

mod memory_cart_storage;
mod redis_cart_storage;

pub use memory_cart_storage::MemoryCartStorage;
pub use redis_cart_storage::RedisCartStorage;
