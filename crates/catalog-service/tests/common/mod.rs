//! Common test infrastructure for Redis integration tests.

use catalog_config::RedisConfig;
use catalog_service::{create_redis_pool, CacheEntryOptions, RedisProductCache};
use deadpool_redis::Pool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Redis container wrapper.
///
/// Keeps the container alive for as long as the test holds it.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            url: format!("redis://127.0.0.1:{}", port),
            pool_size: 4,
        };
        let pool = create_redis_pool(&config).expect("Failed to create Redis pool");

        Self {
            _container: container,
            pool,
        }
    }

    /// Returns a cache over this container with the given expiration policy.
    pub fn cache(&self, options: CacheEntryOptions) -> RedisProductCache {
        RedisProductCache::new(Arc::clone(&self.pool), options)
    }

    /// Returns a raw connection for inspecting keys.
    pub async fn connection(&self) -> deadpool_redis::Connection {
        self.pool.get().await.expect("Failed to get Redis connection")
    }
}
