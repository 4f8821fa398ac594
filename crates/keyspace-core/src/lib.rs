//! # Keyspace Core
//!
//! Shared error types and result aliases for the Keyspace cache integration.
//! Every crate in the workspace reports failures through [`KeyspaceError`].

pub mod error;
pub mod result;

pub use error::*;
pub use result::*;
