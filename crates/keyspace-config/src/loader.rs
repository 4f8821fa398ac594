//! Settings loader with layered sources.

use crate::{format_validation_errors, AppSettings, SettingsValidator};
use config::{Config, ConfigError, Environment, File};
use keyspace_core::{KeyspaceError, KeyspaceResult};
use std::path::Path;
use tracing::{debug, info};

/// Loads settings from the default location (`./config`).
pub fn load_default_settings() -> KeyspaceResult<AppSettings> {
    load_settings("./config")
}

/// Loads settings once from the specified directory.
///
/// Sources are layered in order:
/// 1. `{config_dir}/default.toml` - Default values
/// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
/// 3. `{config_dir}/local.toml` - Local overrides, not committed
/// 4. Environment variables with `KEYSPACE` prefix (e.g.
///    `KEYSPACE__REDIS__HOST`)
///
/// The returned settings are an owned, immutable value. Callers load once at
/// startup and pass the struct into constructors.
pub fn load_settings(config_dir: &str) -> KeyspaceResult<AppSettings> {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file found or error loading it: {}", e);
    }

    let environment =
        std::env::var("KEYSPACE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    info!("Loading settings for environment: {}", environment);

    let mut builder = Config::builder();

    // 1. Load default configuration
    let default_path = format!("{}/default.toml", config_dir);
    if Path::new(&default_path).exists() {
        debug!("Loading default settings from: {}", default_path);
        builder = builder.add_source(File::with_name(&default_path).required(false));
    }

    // 2. Load environment-specific configuration
    let env_path = format!("{}/{}.toml", config_dir, environment);
    if Path::new(&env_path).exists() {
        debug!("Loading environment settings from: {}", env_path);
        builder = builder.add_source(File::with_name(&env_path).required(false));
    }

    // 3. Load local overrides (not committed to version control)
    let local_path = format!("{}/local.toml", config_dir);
    if Path::new(&local_path).exists() {
        debug!("Loading local settings from: {}", local_path);
        builder = builder.add_source(File::with_name(&local_path).required(false));
    }

    // 4. Override with environment variables (KEYSPACE_ prefix)
    builder = builder.add_source(
        Environment::with_prefix("KEYSPACE")
            .separator("__")
            .try_parsing(true),
    );

    let settings: AppSettings = builder
        .build()
        .map_err(config_error_to_keyspace_error)?
        .try_deserialize()
        .map_err(config_error_to_keyspace_error)?;

    if let Err(errors) = SettingsValidator::validate(&settings.redis) {
        return Err(KeyspaceError::Configuration(format_validation_errors(
            &errors,
        )));
    }

    Ok(settings)
}

fn config_error_to_keyspace_error(err: ConfigError) -> KeyspaceError {
    KeyspaceError::Configuration(err.to_string())
}
