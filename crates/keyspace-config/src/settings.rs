//! Application settings structures.

use keyspace_core::{KeyspaceError, KeyspaceResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Root application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Redis cache settings.
    #[serde(default)]
    pub redis: RedisSettings,
}

/// Redis cache settings.
///
/// The struct is plain data: load it once, validate it, and pass it into
/// constructors. `enabled` defaults to off, so the integration never runs
/// unless a deployment switches it on explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisSettings {
    /// Enable the cache integration.
    #[serde(default)]
    pub enabled: bool,

    /// Redis host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Redis password, if the server requires one.
    #[serde(default)]
    pub password: Option<String>,

    /// Redis logical database index.
    #[serde(default)]
    pub database: i64,

    /// Prefix applied to every key this application writes.
    #[serde(default)]
    pub key_prefix: String,

    /// Connection pool size.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
            password: None,
            database: 0,
            key_prefix: String::new(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_pool_size() -> usize {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

impl RedisSettings {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the password, treating an empty string as unset.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Builds the Redis connection URL from host, port, database, and
    /// password. The password is percent-encoded by the URL builder.
    pub fn connection_url(&self) -> KeyspaceResult<String> {
        let mut url = Url::parse(&format!(
            "redis://{}:{}/{}",
            self.host, self.port, self.database
        ))
        .map_err(|e| KeyspaceError::Configuration(format!("Invalid Redis address: {}", e)))?;

        if let Some(password) = self.password() {
            url.set_password(Some(password)).map_err(|()| {
                KeyspaceError::Configuration("Redis password cannot be set on this URL".to_string())
            })?;
        }

        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_disabled_localhost() {
        let settings = RedisSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 6379);
        assert_eq!(settings.database, 0);
        assert_eq!(settings.key_prefix, "");
        assert_eq!(settings.pool_size, 10);
        assert_eq!(settings.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_password_counts_as_unset() {
        let mut settings = RedisSettings::default();
        assert_eq!(settings.password(), None);

        settings.password = Some(String::new());
        assert_eq!(settings.password(), None);

        settings.password = Some("s3cret".to_string());
        assert_eq!(settings.password(), Some("s3cret"));
    }

    #[test]
    fn test_connection_url_without_password() {
        let settings = RedisSettings::default();
        assert_eq!(
            settings.connection_url().unwrap(),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_connection_url_with_password() {
        let settings = RedisSettings {
            password: Some("sup3r-secret".to_string()),
            ..RedisSettings::default()
        };
        assert_eq!(
            settings.connection_url().unwrap(),
            "redis://:sup3r-secret@localhost:6379/0"
        );
    }

    #[test]
    fn test_connection_url_escapes_password() {
        let settings = RedisSettings {
            password: Some("p@ss:word".to_string()),
            ..RedisSettings::default()
        };
        let url = settings.connection_url().unwrap();
        // Exactly one '@' may remain: the userinfo separator.
        assert_eq!(url.matches('@').count(), 1);
        assert!(url.ends_with("@localhost:6379/0"));
    }

    #[test]
    fn test_connection_url_carries_database() {
        let settings = RedisSettings {
            database: 3,
            ..RedisSettings::default()
        };
        assert!(settings.connection_url().unwrap().ends_with("/3"));
    }

    #[test]
    fn test_toml_fills_missing_fields_with_defaults() {
        let settings: AppSettings = toml::from_str(
            r#"
            [redis]
            enabled = true
            key_prefix = "ram"
            "#,
        )
        .unwrap();

        assert!(settings.redis.enabled);
        assert_eq!(settings.redis.key_prefix, "ram");
        assert_eq!(settings.redis.host, "localhost");
        assert_eq!(settings.redis.port, 6379);
        assert_eq!(settings.redis.pool_size, 10);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = AppSettings {
            redis: RedisSettings {
                enabled: true,
                host: "cache.internal".to_string(),
                port: 6380,
                password: Some("s3cret".to_string()),
                database: 2,
                key_prefix: "ram".to_string(),
                pool_size: 32,
                connect_timeout_secs: 10,
            },
        };

        let rendered = toml::to_string(&settings).unwrap();
        let restored: AppSettings = toml::from_str(&rendered).unwrap();

        assert_eq!(restored.redis.host, settings.redis.host);
        assert_eq!(restored.redis.port, settings.redis.port);
        assert_eq!(restored.redis.password, settings.redis.password);
        assert_eq!(restored.redis.key_prefix, settings.redis.key_prefix);
    }
}
