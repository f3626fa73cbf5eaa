//! Configuration validation module.
//!
//! Every problem in a loaded configuration is collected, so a single start
//! attempt reports all of them.

use crate::{AppConfig, CacheConfig, DatabaseConfig, ObservabilityConfig, RedisConfig, ServerConfig};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size is zero or exceeds the maximum allowed.
    PoolSizeOutOfRange { name: String, value: u64, maximum: u64 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout or expiration value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Sliding window longer than the absolute lifetime.
    SlidingExceedsAbsolute { sliding: u64, absolute: u64 },
    /// Cache capacity must be positive.
    ZeroCapacity,
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
    /// Metrics path must be an absolute route.
    InvalidMetricsPath { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeOutOfRange { name, value, maximum } => {
                write!(f, "Pool size '{}' must be between 1 and {}, got {}", name, maximum, value)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::SlidingExceedsAbsolute { sliding, absolute } => {
                write!(
                    f,
                    "Cache sliding expiration ({}s) cannot exceed absolute expiration ({}s)",
                    sliding, absolute
                )
            }
            Self::ZeroCapacity => write!(f, "Cache max_capacity must be positive"),
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
            Self::InvalidMetricsPath { value } => {
                write!(f, "Metrics path must start with '/', got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u64 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        if config.database.backend.is_postgres() {
            Self::validate_database(&config.database, &mut errors);
        }
        if config.cache.backend.is_redis() {
            Self::validate_redis(&config.redis, &mut errors);
        }
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        // 0 is invalid for binding
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        Self::validate_url("database", &config.url, &["postgres", "postgresql"], errors);

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        Self::validate_pool_size("database.max_connections", u64::from(config.max_connections), errors);

        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
        if config.idle_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        Self::validate_url("redis", &config.url, &["redis", "rediss"], errors);
        Self::validate_pool_size("redis.pool_size", config.pool_size as u64, errors);
    }

    fn validate_cache(config: &CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.absolute_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.absolute_expiration_secs".to_string(),
                value: 0,
            });
        }
        if config.sliding_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.sliding_expiration_secs".to_string(),
                value: 0,
            });
        }
        if config.sliding_expiration_secs > config.absolute_expiration_secs {
            errors.push(ConfigValidationError::SlidingExceedsAbsolute {
                sliding: config.sliding_expiration_secs,
                absolute: config.absolute_expiration_secs,
            });
        }
        if config.max_capacity == 0 {
            errors.push(ConfigValidationError::ZeroCapacity);
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }

        if config.metrics_enabled && !config.metrics_path.starts_with('/') {
            errors.push(ConfigValidationError::InvalidMetricsPath {
                value: config.metrics_path.clone(),
            });
        }
    }

    fn validate_url(
        url_type: &str,
        raw: &str,
        schemes: &[&str],
        errors: &mut Vec<ConfigValidationError>,
    ) {
        match Url::parse(raw) {
            Ok(url) if schemes.contains(&url.scheme()) => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: url_type.to_string(),
                message: format!(
                    "unsupported scheme '{}' (expected one of: {})",
                    url.scheme(),
                    schemes.join(", ")
                ),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: url_type.to_string(),
                message: format!("Invalid URL format: {}", e),
            }),
        }
    }

    fn validate_pool_size(name: &str, value: u64, errors: &mut Vec<ConfigValidationError>) {
        if value == 0 || value > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeOutOfRange {
                name: name.to_string(),
                value,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
