//! Backend selection for the store and the cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which store holds the durable product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL through SQLx.
    #[default]
    Postgres,
    /// Process-local map, lost on restart.
    Memory,
}

impl StoreBackend {
    /// Returns true if the store needs a database connection.
    #[must_use]
    pub const fn is_postgres(&self) -> bool {
        matches!(self, Self::Postgres)
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Which cache fronts the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process cache, private to this instance.
    #[default]
    Memory,
    /// Redis, shared by every instance.
    Redis,
}

impl CacheBackend {
    /// Returns true if the cache needs a Redis connection.
    #[must_use]
    pub const fn is_redis(&self) -> bool {
        matches!(self, Self::Redis)
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Redis => write!(f, "redis"),
        }
    }
}
