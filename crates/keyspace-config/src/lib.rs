//! # Keyspace Config
//!
//! Configuration management for the Keyspace cache integration.
//! Settings are layered from files and environment variables and loaded
//! once at startup; there is no refresh mechanism.

mod loader;
mod settings;
mod validation;

pub use loader::*;
pub use settings::*;
pub use validation::*;
