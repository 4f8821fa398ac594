//! Cache client facade.

use crate::backend::CacheBackend;
use crate::key_codec::PrefixKeyCodec;
use crate::manager::{CacheManager, NamedCache};
use crate::redis_backend::RedisBackend;
use crate::typed::TypedCache;
use crate::value::{CacheShape, CacheValue};
use keyspace_config::{format_validation_errors, RedisSettings, SettingsValidator};
use keyspace_core::{KeyspaceError, KeyspaceResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for cache access.
///
/// One client owns one backend pool and one key codec; every typed handle
/// and named cache it hands out shares them. There is no per-handle
/// connection state.
#[derive(Clone)]
pub struct CacheClient {
    backend: Arc<dyn CacheBackend>,
    codec: PrefixKeyCodec,
}

impl CacheClient {
    /// Connects to Redis per the given settings.
    ///
    /// Fails with [`KeyspaceError::Disabled`] before any network activity
    /// when the integration is switched off, and with a configuration error
    /// when the settings don't validate.
    pub async fn connect(settings: &RedisSettings) -> KeyspaceResult<Self> {
        if !settings.enabled {
            debug!("Cache integration is disabled, refusing to connect");
            return Err(KeyspaceError::Disabled);
        }

        if let Err(errors) = SettingsValidator::validate(settings) {
            return Err(KeyspaceError::Configuration(format_validation_errors(
                &errors,
            )));
        }

        let backend = RedisBackend::connect(settings).await?;
        let codec = PrefixKeyCodec::new(settings.key_prefix.clone());

        info!(prefix = %settings.key_prefix, "Cache client ready");

        Ok(Self {
            backend: Arc::new(backend),
            codec,
        })
    }

    /// Builds a client over an existing backend.
    ///
    /// The composition seam for alternative transports and for tests.
    pub fn with_backend(backend: Arc<dyn CacheBackend>, codec: PrefixKeyCodec) -> Self {
        Self { backend, codec }
    }

    /// The key codec shared by everything this client hands out.
    #[must_use]
    pub fn key_codec(&self) -> &PrefixKeyCodec {
        &self.codec
    }

    fn handle<T: CacheShape>(&self) -> TypedCache<T> {
        TypedCache::new(Arc::clone(&self.backend), self.codec.clone())
    }

    /// Handle for values of any supported shape.
    #[must_use]
    pub fn objects(&self) -> TypedCache<CacheValue> {
        self.handle()
    }

    /// Handle for strings.
    #[must_use]
    pub fn strings(&self) -> TypedCache<String> {
        self.handle()
    }

    /// Handle for 32-bit integers.
    #[must_use]
    pub fn integers(&self) -> TypedCache<i32> {
        self.handle()
    }

    /// Handle for 64-bit integers.
    #[must_use]
    pub fn longs(&self) -> TypedCache<i64> {
        self.handle()
    }

    /// Handle for 16-bit integers.
    #[must_use]
    pub fn shorts(&self) -> TypedCache<i16> {
        self.handle()
    }

    /// Handle for 8-bit integers.
    #[must_use]
    pub fn bytes(&self) -> TypedCache<i8> {
        self.handle()
    }

    /// Handle for booleans.
    #[must_use]
    pub fn booleans(&self) -> TypedCache<bool> {
        self.handle()
    }

    /// Handle for 64-bit floats.
    #[must_use]
    pub fn doubles(&self) -> TypedCache<f64> {
        self.handle()
    }

    /// Handle for 32-bit floats.
    #[must_use]
    pub fn floats(&self) -> TypedCache<f32> {
        self.handle()
    }

    /// The named-cache manager sharing this client's pool and codec.
    #[must_use]
    pub fn cache_manager(&self) -> CacheManager {
        CacheManager::new(Arc::clone(&self.backend), self.codec.clone())
    }

    /// Shorthand for `cache_manager().cache(name)`.
    #[must_use]
    pub fn cache(&self, name: &str) -> NamedCache {
        self.cache_manager().cache(name)
    }

    /// Lists keys matching `pattern`.
    ///
    /// The pattern goes through the key codec like any key, and every match
    /// runs back through the decoder, so results come out still carrying the
    /// prefix.
    pub async fn keys(&self, pattern: &str) -> KeyspaceResult<Vec<String>> {
        let wire_pattern = self.codec.encode(pattern);
        let raw = self.backend.keys(&wire_pattern).await?;

        raw.iter()
            .map(|bytes| self.codec.decode_bytes(bytes))
            .collect()
    }

    /// Round-trip connectivity check.
    pub async fn ping(&self) -> KeyspaceResult<()> {
        self.backend.ping().await
    }
}
