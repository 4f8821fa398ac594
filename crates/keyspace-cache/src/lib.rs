//! Keyspace Cache - Prefix-Namespaced Redis Caching
//!
//! A Redis cache client with:
//! - A key codec that namespaces every key with a configured prefix
//! - Typed read/write handles, one per supported value shape
//! - A JSON value codec carrying an explicit type tag on the wire
//! - A named-cache manager with the same prefix treatment as manual keys
//! - One deadpool-backed connection pool behind a swappable backend trait
//!
//! # Example
//!
//! ```rust,ignore
//! use keyspace_cache::{CacheClient, CacheValue};
//! use keyspace_config::load_default_settings;
//!
//! let settings = load_default_settings()?;
//! let client = CacheClient::connect(&settings.redis).await?;
//!
//! // Typed handles share one pool and one key codec.
//! client.strings().put("session-42", "alice".to_string()).await?;
//! let owner = client.strings().get("session-42").await?;
//!
//! // Named caches live in their own namespace, prefixed the same way.
//! let sessions = client.cache("sessions");
//! sessions.put("42", CacheValue::from("alice")).await?;
//! ```

pub mod backend;
pub mod client;
pub mod key_codec;
pub mod manager;
pub mod redis_backend;
pub mod typed;
pub mod value;

pub use backend::CacheBackend;
pub use client::CacheClient;
pub use key_codec::PrefixKeyCodec;
pub use manager::{CacheManager, NamedCache};
pub use redis_backend::RedisBackend;
pub use typed::TypedCache;
pub use value::{CacheShape, CacheValue};
