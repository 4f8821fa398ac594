//! Settings validation module.
//!
//! Validates configuration values before any connection is attempted,
//! failing fast on invalid settings rather than at runtime.

use crate::RedisSettings;
use std::fmt;

/// Settings validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { value: u16 },
    /// Pool size must be at least 1.
    InvalidPoolSize { value: usize },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: usize, maximum: usize },
    /// Database index must not be negative.
    NegativeDatabase { value: i64 },
    /// Host is required when the integration is enabled.
    MissingHost,
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
}

impl fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { value } => {
                write!(f, "Invalid Redis port: {} (must be 1-65535)", value)
            }
            Self::InvalidPoolSize { value } => {
                write!(f, "Invalid pool size: {} (must be at least 1)", value)
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::NegativeDatabase { value } => {
                write!(f, "Invalid database index: {} (must not be negative)", value)
            }
            Self::MissingHost => {
                write!(f, "Redis host is required when the cache is enabled")
            }
            Self::NonPositiveTimeout { name } => {
                write!(f, "Timeout '{}' must be positive", name)
            }
        }
    }
}

impl std::error::Error for SettingsValidationError {}

/// Result of settings validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<SettingsValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: SettingsValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[SettingsValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<SettingsValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Settings validator.
pub struct SettingsValidator;

impl SettingsValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: usize = 1000;

    /// Validates the Redis settings.
    ///
    /// Disabled settings always pass: nothing will connect with them.
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(settings: &RedisSettings) -> Result<(), Vec<SettingsValidationError>> {
        let mut result = ValidationResult::new();

        if !settings.enabled {
            return result.into_result();
        }

        if settings.host.trim().is_empty() {
            result.add_error(SettingsValidationError::MissingHost);
        }

        if settings.port == 0 {
            result.add_error(SettingsValidationError::InvalidPort {
                value: settings.port,
            });
        }

        if settings.pool_size == 0 {
            result.add_error(SettingsValidationError::InvalidPoolSize {
                value: settings.pool_size,
            });
        }
        if settings.pool_size > Self::MAX_POOL_SIZE {
            result.add_error(SettingsValidationError::PoolSizeTooLarge {
                value: settings.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if settings.database < 0 {
            result.add_error(SettingsValidationError::NegativeDatabase {
                value: settings.database,
            });
        }

        if settings.connect_timeout_secs == 0 {
            result.add_error(SettingsValidationError::NonPositiveTimeout {
                name: "connect_timeout_secs".to_string(),
            });
        }

        result.into_result()
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[SettingsValidationError]) -> String {
    let mut output = String::from("Settings validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_settings() -> RedisSettings {
        RedisSettings {
            enabled: true,
            ..RedisSettings::default()
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(SettingsValidator::validate(&enabled_settings()).is_ok());
    }

    #[test]
    fn test_disabled_settings_always_pass() {
        let settings = RedisSettings {
            enabled: false,
            port: 0,
            pool_size: 0,
            ..RedisSettings::default()
        };
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut settings = enabled_settings();
        settings.port = 0;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SettingsValidationError::InvalidPort { value: 0 })));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut settings = enabled_settings();
        settings.pool_size = 0;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SettingsValidationError::InvalidPoolSize { .. })));
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let mut settings = enabled_settings();
        settings.pool_size = 2000;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SettingsValidationError::PoolSizeTooLarge { .. })));
    }

    #[test]
    fn test_negative_database_rejected() {
        let mut settings = enabled_settings();
        settings.database = -1;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SettingsValidationError::NegativeDatabase { value: -1 })));
    }

    #[test]
    fn test_blank_host_rejected() {
        let mut settings = enabled_settings();
        settings.host = "   ".to_string();

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SettingsValidationError::MissingHost)));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut settings = enabled_settings();
        settings.port = 0;
        settings.pool_size = 0;
        settings.database = -2;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            SettingsValidationError::InvalidPort { value: 0 },
            SettingsValidationError::MissingHost,
        ];

        let output = format_validation_errors(&errors);
        assert!(output.contains("Invalid Redis port"));
        assert!(output.contains("host is required"));
    }
}
