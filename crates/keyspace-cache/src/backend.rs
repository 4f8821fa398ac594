//! Backend trait for the raw cache transport.

use async_trait::async_trait;
use keyspace_core::KeyspaceResult;
use std::time::Duration;

/// Raw cache transport over already-encoded wire keys.
///
/// Values are opaque JSON strings at this level; the layers above handle key
/// prefixing and value tagging. Implementations must be safe for concurrent
/// use, and surface transport failures as-is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a raw value.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> KeyspaceResult<Option<String>>;

    /// Set a raw value, expiring after `ttl` when one is given.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> KeyspaceResult<()>;

    /// Delete a key.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> KeyspaceResult<bool>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> KeyspaceResult<bool>;

    /// List the raw bytes of keys matching a glob pattern.
    async fn keys(&self, pattern: &str) -> KeyspaceResult<Vec<Vec<u8>>>;

    /// Delete every key matching a glob pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> KeyspaceResult<u64>;

    /// Round-trip connectivity check.
    async fn ping(&self) -> KeyspaceResult<()>;
}
