//! Result type aliases for Keyspace.

use crate::KeyspaceError;

/// A specialized `Result` type for cache operations.
pub type KeyspaceResult<T> = Result<T, KeyspaceError>;
