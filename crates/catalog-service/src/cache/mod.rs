//! Caching infrastructure for the service layer.
//!
//! One trait, [`ProductCache`], with a process-local backend built on moka
//! and a shared backend on Redis. Both hold [`ProductResponse`] projections
//! keyed per product plus one entry for the whole collection.
//!
//! [`ProductResponse`]: crate::dto::ProductResponse

pub mod cache_keys;
mod memory_cache;
mod options;
mod product_cache;
mod redis_cache;

pub use memory_cache::{InMemoryProductCache, DEFAULT_MAX_CAPACITY};
pub use options::CacheEntryOptions;
pub use product_cache::ProductCache;
pub use redis_cache::{create_redis_pool, RedisProductCache};
