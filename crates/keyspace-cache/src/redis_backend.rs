//! Redis-backed cache transport.

use crate::backend::CacheBackend;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use keyspace_config::RedisSettings;
use keyspace_core::{KeyspaceError, KeyspaceResult};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info};

/// Cache backend over a shared deadpool Redis pool.
pub struct RedisBackend {
    pool: Pool,
}

impl RedisBackend {
    /// Creates the connection pool and verifies connectivity with `PING`.
    pub async fn connect(settings: &RedisSettings) -> KeyspaceResult<Self> {
        info!(
            host = %settings.host,
            port = settings.port,
            database = settings.database,
            "Creating Redis connection pool"
        );

        let cfg = Config::from_url(settings.connection_url()?);

        let pool = cfg
            .builder()
            .map_err(|e| KeyspaceError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(settings.pool_size)
            .create_timeout(Some(settings.connect_timeout()))
            .wait_timeout(Some(settings.connect_timeout()))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| KeyspaceError::Configuration(format!("Failed to create pool: {}", e)))?;

        let backend = Self { pool };
        backend.ping().await?;

        info!("Redis connection pool created successfully");

        Ok(backend)
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool.
    async fn conn(&self) -> KeyspaceResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get_raw(&self, key: &str) -> KeyspaceResult<Option<String>> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(key).await?;

        match &value {
            Some(_) => debug!(key = %key, "Cache hit"),
            None => debug!(key = %key, "Cache miss"),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> KeyspaceResult<()> {
        let mut conn = self.conn().await?;

        match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                let _: () = conn.set_ex(key, value, ttl_secs).await?;
                debug!(key = %key, ttl_secs, "Cached key with expiry");
            }
            None => {
                let _: () = conn.set(key, value).await?;
                debug!(key = %key, "Cached key");
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> KeyspaceResult<bool> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> KeyspaceResult<bool> {
        let mut conn = self.conn().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn keys(&self, pattern: &str) -> KeyspaceResult<Vec<Vec<u8>>> {
        let mut conn = self.conn().await?;
        let keys: Vec<Vec<u8>> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut *conn)
            .await?;
        Ok(keys)
    }

    async fn delete_pattern(&self, pattern: &str) -> KeyspaceResult<u64> {
        let mut conn = self.conn().await?;

        // Use KEYS to find matching keys (SCAN would be better for production)
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut *conn)
            .await?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: i64 = conn.del(&keys).await?;
        debug!(pattern = %pattern, count = deleted, "Deleted keys matching pattern");
        Ok(deleted as u64)
    }

    async fn ping(&self) -> KeyspaceResult<()> {
        let mut conn = self.conn().await?;
        redis::cmd("PING").query_async::<String>(&mut *conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pool_builds_without_connecting() {
        let cfg = Config::from_url("redis://localhost:6379/0");
        let pool = cfg
            .builder()
            .unwrap()
            .max_size(1)
            .runtime(Runtime::Tokio1)
            .build()
            .unwrap();

        let backend = RedisBackend::from_pool(pool);
        assert_eq!(backend.pool.status().max_size, 1);
    }
}
