//! Expiration policy shared by every cache entry.

use catalog_config::CacheConfig;
use std::time::Duration;

/// Absolute expiration applied when nothing is configured.
pub const DEFAULT_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(300);

/// Sliding expiration applied when nothing is configured.
pub const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(60);

/// Expiration options for a cache entry.
///
/// An entry expires `sliding_expiration` after its last access, and never
/// later than `absolute_expiration` after it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntryOptions {
    pub absolute_expiration: Duration,
    pub sliding_expiration: Duration,
}

impl CacheEntryOptions {
    #[must_use]
    pub const fn new(absolute_expiration: Duration, sliding_expiration: Duration) -> Self {
        Self {
            absolute_expiration,
            sliding_expiration,
        }
    }

    #[must_use]
    pub const fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.absolute_expiration(), config.sliding_expiration())
    }
}

impl Default for CacheEntryOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ABSOLUTE_EXPIRATION, DEFAULT_SLIDING_EXPIRATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CacheEntryOptions::default();
        assert_eq!(options.absolute_expiration, Duration::from_secs(300));
        assert_eq!(options.sliding_expiration, Duration::from_secs(60));
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            absolute_expiration_secs: 120,
            sliding_expiration_secs: 30,
            ..CacheConfig::default()
        };
        let options = CacheEntryOptions::from_config(&config);
        assert_eq!(options.absolute_expiration, Duration::from_secs(120));
        assert_eq!(options.sliding_expiration, Duration::from_secs(30));
    }
}
