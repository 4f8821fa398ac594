//! Named-cache manager.

use crate::backend::CacheBackend;
use crate::key_codec::PrefixKeyCodec;
use crate::value::CacheValue;
use keyspace_core::KeyspaceResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Hands out [`NamedCache`] views, one per cache name.
///
/// The namespace of a named cache is the cache name run through the same key
/// codec used for manual keys, so named caches receive the identical prefix
/// treatment. Entries live under `"{namespace}::{key}"`; the `::` separator
/// keeps them disjoint from manually written keys.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
    codec: PrefixKeyCodec,
    default_ttl: Option<Duration>,
}

impl CacheManager {
    pub(crate) fn new(backend: Arc<dyn CacheBackend>, codec: PrefixKeyCodec) -> Self {
        Self {
            backend,
            codec,
            default_ttl: None,
        }
    }

    /// Sets a TTL applied to every `put` that doesn't carry its own.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Returns the wire namespace a cache name maps to.
    #[must_use]
    pub fn namespace(&self, cache_name: &str) -> String {
        self.codec.encode(cache_name)
    }

    /// Returns the named cache for `cache_name`.
    #[must_use]
    pub fn cache(&self, cache_name: &str) -> NamedCache {
        NamedCache {
            name: cache_name.to_string(),
            namespace: self.namespace(cache_name),
            backend: Arc::clone(&self.backend),
            default_ttl: self.default_ttl,
        }
    }
}

/// One named cache: a get/put/evict/clear surface over its own namespace.
#[derive(Clone)]
pub struct NamedCache {
    name: String,
    namespace: String,
    backend: Arc<dyn CacheBackend>,
    default_ttl: Option<Duration>,
}

impl NamedCache {
    /// The logical cache name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire namespace entries are stored under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn entry_key(&self, key: &str) -> String {
        format!("{}::{}", self.namespace, key)
    }

    /// Reads an entry.
    pub async fn get(&self, key: &str) -> KeyspaceResult<Option<CacheValue>> {
        match self.backend.get_raw(&self.entry_key(key)).await? {
            Some(json) => Ok(Some(CacheValue::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Writes an entry, applying the manager's default TTL when one is set.
    pub async fn put(&self, key: &str, value: CacheValue) -> KeyspaceResult<()> {
        self.write(key, value, self.default_ttl).await
    }

    /// Writes an entry that expires after `ttl`.
    pub async fn put_with_ttl(
        &self,
        key: &str,
        value: CacheValue,
        ttl: Duration,
    ) -> KeyspaceResult<()> {
        self.write(key, value, Some(ttl)).await
    }

    async fn write(&self, key: &str, value: CacheValue, ttl: Option<Duration>) -> KeyspaceResult<()> {
        let json = value.to_json()?;
        self.backend.set_raw(&self.entry_key(key), &json, ttl).await?;
        debug!(cache = %self.name, key = %key, "Stored named-cache entry");
        Ok(())
    }

    /// Reads an entry, computing and storing it on a miss.
    ///
    /// A failure to store the computed value is logged and swallowed; the
    /// value is still returned to the caller.
    pub async fn get_or_put<F, Fut>(&self, key: &str, factory: F) -> KeyspaceResult<CacheValue>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = KeyspaceResult<CacheValue>> + Send,
    {
        if let Some(cached) = self.get(key).await? {
            debug!(cache = %self.name, key = %key, "Named-cache hit");
            return Ok(cached);
        }

        let value = factory().await?;

        if let Err(e) = self.put(key, value.clone()).await {
            warn!(cache = %self.name, key = %key, error = %e, "Failed to store computed entry");
        }

        Ok(value)
    }

    /// Removes an entry. Returns `true` if it existed.
    pub async fn evict(&self, key: &str) -> KeyspaceResult<bool> {
        self.backend.delete(&self.entry_key(key)).await
    }

    /// Removes every entry in this cache. Returns the number removed.
    pub async fn clear(&self) -> KeyspaceResult<u64> {
        let cleared = self.backend.delete_pattern(&self.entry_key("*")).await?;
        debug!(cache = %self.name, count = cleared, "Cleared named cache");
        Ok(cleared)
    }
}
