//! Redis-based product cache.

use super::cache_keys::{self, ALL_PRODUCTS_KEY};
use super::{CacheEntryOptions, ProductCache};
use crate::dto::ProductResponse;
use async_trait::async_trait;
use catalog_config::RedisConfig;
use catalog_core::{CatalogError, CatalogResult, HealthCheck, HealthStatus, ProductId};
use chrono::{DateTime, Utc};
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, PoolConfig, Runtime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Stored form of every cached value.
///
/// Redis only knows one TTL per key, so the absolute deadline travels with
/// the value and the key TTL carries the sliding window.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope<T> {
    absolute_expiration: DateTime<Utc>,
    value: T,
}

/// Redis product cache shared by every instance of the service.
pub struct RedisProductCache {
    pool: Arc<Pool>,
    options: CacheEntryOptions,
}

/// Creates a Redis connection pool from configuration.
pub fn create_redis_pool(config: &RedisConfig) -> CatalogResult<Arc<Pool>> {
    let mut pool_config = Config::from_url(&config.url);
    pool_config.pool = Some(PoolConfig::new(config.pool_size));

    let pool = pool_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CatalogError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis connection pool created");
    Ok(Arc::new(pool))
}

/// Time-to-live for a key read or written at `now`.
///
/// Returns `None` once the absolute deadline has passed.
fn sliding_window(
    now: DateTime<Utc>,
    absolute_deadline: DateTime<Utc>,
    sliding: Duration,
) -> Option<Duration> {
    let remaining = (absolute_deadline - now).to_std().ok()?;
    if remaining.is_zero() {
        return None;
    }
    Some(remaining.min(sliding))
}

fn as_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

impl RedisProductCache {
    /// Creates a Redis product cache.
    #[must_use]
    pub fn new(pool: Arc<Pool>, options: CacheEntryOptions) -> Self {
        Self { pool, options }
    }

    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to get Redis connection: {}", e)))
    }

    /// Serializes `value` with its absolute deadline and the initial key TTL.
    fn envelope<T: Serialize>(&self, value: &T) -> CatalogResult<(String, u64)> {
        let now = Utc::now();
        let absolute_deadline = now
            + chrono::Duration::from_std(self.options.absolute_expiration)
                .map_err(|e| CatalogError::Cache(format!("Invalid absolute expiration: {}", e)))?;
        let ttl = sliding_window(now, absolute_deadline, self.options.sliding_expiration)
            .unwrap_or(Duration::from_millis(1));

        let json = serde_json::to_string(&CacheEnvelope {
            absolute_expiration: absolute_deadline,
            value,
        })?;
        Ok((json, as_millis(ttl)))
    }

    /// Reads a key, renewing its sliding window on a hit.
    async fn read<T: DeserializeOwned>(&self, key: &str) -> CatalogResult<Option<T>> {
        let mut conn = self.get_conn().await?;
        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let envelope: CacheEnvelope<T> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("Discarding unreadable cache entry '{}': {}", key, e);
                self.delete_keys(&mut conn, &[key]).await?;
                return Ok(None);
            }
        };

        match sliding_window(Utc::now(), envelope.absolute_expiration, self.options.sliding_expiration) {
            Some(ttl) => {
                let _: i64 = redis::cmd("PEXPIRE")
                    .arg(key)
                    .arg(as_millis(ttl))
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| CatalogError::Cache(format!("Failed to refresh key '{}': {}", key, e)))?;
                Ok(Some(envelope.value))
            }
            None => {
                debug!("Cache entry '{}' passed its absolute expiration", key);
                self.delete_keys(&mut conn, &[key]).await?;
                Ok(None)
            }
        }
    }

    async fn delete_keys(
        &self,
        conn: &mut deadpool_redis::Connection,
        keys: &[&str],
    ) -> CatalogResult<()> {
        let _: i64 = conn
            .del(keys)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to delete keys {:?}: {}", keys, e)))?;
        Ok(())
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    async fn get(&self, id: ProductId) -> CatalogResult<Option<ProductResponse>> {
        self.read(&cache_keys::product_by_id(id)).await
    }

    async fn get_all(&self) -> CatalogResult<Option<Vec<ProductResponse>>> {
        self.read(ALL_PRODUCTS_KEY).await
    }

    async fn set(&self, id: ProductId, product: &ProductResponse) -> CatalogResult<()> {
        let key = cache_keys::product_by_id(id);
        let (json, ttl_ms) = self.envelope(product)?;
        let mut conn = self.get_conn().await?;

        // Entity write and aggregate invalidation land together.
        let _: () = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(json)
            .arg("PX")
            .arg(ttl_ms)
            .ignore()
            .cmd("DEL")
            .arg(ALL_PRODUCTS_KEY)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!(product_id = %id, ttl_ms, "Cached product");
        Ok(())
    }

    async fn set_all(&self, products: &[ProductResponse]) -> CatalogResult<()> {
        let (json, ttl_ms) = self.envelope(&products)?;
        let mut conn = self.get_conn().await?;

        let _: () = redis::cmd("SET")
            .arg(ALL_PRODUCTS_KEY)
            .arg(json)
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                CatalogError::Cache(format!("Failed to set key '{}': {}", ALL_PRODUCTS_KEY, e))
            })?;

        debug!(count = products.len(), ttl_ms, "Cached product collection");
        Ok(())
    }

    async fn remove(&self, id: ProductId) -> CatalogResult<()> {
        let key = cache_keys::product_by_id(id);
        let mut conn = self.get_conn().await?;
        self.delete_keys(&mut conn, &[key.as_str(), ALL_PRODUCTS_KEY]).await?;
        debug!(product_id = %id, "Removed cached product");
        Ok(())
    }

    async fn remove_all(&self) -> CatalogResult<()> {
        let mut conn = self.get_conn().await?;
        self.delete_keys(&mut conn, &[ALL_PRODUCTS_KEY]).await
    }
}

#[async_trait]
impl HealthCheck for RedisProductCache {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("Redis ping failed: {}", e)),
        }
    }
}
