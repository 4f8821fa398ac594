//! Typed cache handles.

use crate::backend::CacheBackend;
use crate::key_codec::PrefixKeyCodec;
use crate::value::{CacheShape, CacheValue};
use keyspace_core::KeyspaceResult;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A read/write handle fixed to one value shape.
///
/// Handles are cheap to create and clone; every handle produced by one
/// client shares that client's backend pool and key codec. Keys pass through
/// the codec on the way in, values through the tagged JSON codec.
pub struct TypedCache<T: CacheShape> {
    backend: Arc<dyn CacheBackend>,
    codec: PrefixKeyCodec,
    _shape: PhantomData<fn() -> T>,
}

impl<T: CacheShape> Clone for TypedCache<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            codec: self.codec.clone(),
            _shape: PhantomData,
        }
    }
}

impl<T: CacheShape> TypedCache<T> {
    pub(crate) fn new(backend: Arc<dyn CacheBackend>, codec: PrefixKeyCodec) -> Self {
        Self {
            backend,
            codec,
            _shape: PhantomData,
        }
    }

    /// Reads a value.
    ///
    /// A missing key is `Ok(None)`; a stored value of a different shape is a
    /// [`keyspace_core::KeyspaceError::ShapeMismatch`].
    pub async fn get(&self, key: &str) -> KeyspaceResult<Option<T>> {
        let wire_key = self.codec.encode(key);
        match self.backend.get_raw(&wire_key).await? {
            Some(json) => {
                let value = CacheValue::from_json(&json)?;
                Ok(Some(T::from_value(value)?))
            }
            None => Ok(None),
        }
    }

    /// Writes a value with no expiry.
    pub async fn put(&self, key: &str, value: T) -> KeyspaceResult<()> {
        self.write(key, value, None).await
    }

    /// Writes a value that expires after `ttl`.
    pub async fn put_with_ttl(&self, key: &str, value: T, ttl: Duration) -> KeyspaceResult<()> {
        self.write(key, value, Some(ttl)).await
    }

    async fn write(&self, key: &str, value: T, ttl: Option<Duration>) -> KeyspaceResult<()> {
        let wire_key = self.codec.encode(key);
        let json = value.into_value().to_json()?;
        self.backend.set_raw(&wire_key, &json, ttl).await?;
        debug!(key = %wire_key, shape = T::NAME, "Stored cache value");
        Ok(())
    }

    /// Deletes a key. Returns `true` if it existed.
    pub async fn delete(&self, key: &str) -> KeyspaceResult<bool> {
        self.backend.delete(&self.codec.encode(key)).await
    }

    /// Checks whether a key exists.
    pub async fn exists(&self, key: &str) -> KeyspaceResult<bool> {
        self.backend.exists(&self.codec.encode(key)).await
    }
}
