//! Cache error types.

use thiserror::Error;

/// Errors produced by the cache integration.
///
/// Transport failures pass through unmodified; there is no retry, circuit
/// breaking, or fallback anywhere in this workspace.
#[derive(Debug, Error)]
pub enum KeyspaceError {
    /// The cache integration is switched off in configuration.
    #[error("Cache integration is disabled")]
    Disabled,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Value serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Redis pool error.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// A stored value had a different shape than the handle expected.
    #[error("Cached value shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Wire key bytes were not valid UTF-8.
    #[error("Key encoding error: {0}")]
    KeyEncoding(#[from] std::string::FromUtf8Error),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeyspaceError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the error came from the Redis transport rather than
    /// from the data itself.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Redis(_) | Self::Pool(_))
    }

    /// Returns true if the error means the stored bytes could not be
    /// interpreted.
    #[must_use]
    pub const fn is_codec(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_) | Self::ShapeMismatch { .. } | Self::KeyEncoding(_)
        )
    }
}
