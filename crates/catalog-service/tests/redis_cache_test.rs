//! Integration tests for RedisProductCache.
//!
//! These run against a real Redis server using testcontainers and are
//! ignored by default. Run them with `cargo test -- --ignored` on a machine
//! with Docker available.

mod common;

use catalog_core::{HealthCheck, ProductId};
use catalog_domain::Product;
use catalog_service::cache_keys::{self, ALL_PRODUCTS_KEY};
use catalog_service::{CacheEntryOptions, ProductCache, ProductResponse};
use common::TestRedis;
use deadpool_redis::redis;
use std::time::Duration;

fn response(name: &str) -> ProductResponse {
    ProductResponse::from(Product::new(name, "", 9.99, 3).expect("valid product"))
}

async fn key_exists(server: &TestRedis, key: &str) -> bool {
    let mut conn = server.connection().await;
    let count: i64 = redis::cmd("EXISTS")
        .arg(key)
        .query_async(&mut conn)
        .await
        .expect("EXISTS failed");
    count == 1
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_missing_is_none() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());

    assert!(cache.get(ProductId::new()).await.unwrap().is_none());
    assert!(cache.get_all().await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_then_get() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let mouse = response("Mouse");

    cache.set(mouse.id, &mouse).await.unwrap();

    assert_eq!(cache.get(mouse.id).await.unwrap(), Some(mouse));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_invalidates_aggregate() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let mouse = response("Mouse");
    cache.set_all(&[mouse.clone()]).await.unwrap();
    assert_eq!(cache.get_all().await.unwrap(), Some(vec![mouse]));

    let keyboard = response("Keyboard");
    cache.set(keyboard.id, &keyboard).await.unwrap();

    assert!(cache.get_all().await.unwrap().is_none());
    assert!(!key_exists(&server, ALL_PRODUCTS_KEY).await);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_all_leaves_entities() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let mouse = response("Mouse");
    cache.set(mouse.id, &mouse).await.unwrap();

    cache.set_all(&[]).await.unwrap();

    assert_eq!(cache.get(mouse.id).await.unwrap(), Some(mouse));
    assert_eq!(cache.get_all().await.unwrap(), Some(vec![]));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_is_idempotent_and_invalidates_aggregate() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let mouse = response("Mouse");
    cache.set(mouse.id, &mouse).await.unwrap();
    cache.set_all(&[mouse.clone()]).await.unwrap();

    cache.remove(mouse.id).await.unwrap();
    assert!(cache.get(mouse.id).await.unwrap().is_none());
    assert!(cache.get_all().await.unwrap().is_none());

    cache.remove(mouse.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_all_only_drops_aggregate() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let mouse = response("Mouse");
    cache.set(mouse.id, &mouse).await.unwrap();
    cache.set_all(&[mouse.clone()]).await.unwrap();

    cache.remove_all().await.unwrap();
    assert!(cache.get_all().await.unwrap().is_none());
    assert_eq!(cache.get(mouse.id).await.unwrap(), Some(mouse));

    cache.remove_all().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reads_renew_sliding_window_until_absolute_deadline() {
    let server = TestRedis::new().await;
    let options = CacheEntryOptions::new(Duration::from_millis(2_000), Duration::from_millis(800));
    let cache = server.cache(options);
    let mouse = response("Mouse");
    cache.set(mouse.id, &mouse).await.unwrap();

    // Outlives the sliding window several times over while kept warm.
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(cache.get(mouse.id).await.unwrap().as_ref(), Some(&mouse));
    }

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(cache.get(mouse.id).await.unwrap().is_none());
    assert!(!key_exists(&server, &cache_keys::product_by_id(mouse.id)).await);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_idle_entries_expire_after_sliding_window() {
    let server = TestRedis::new().await;
    let options = CacheEntryOptions::new(Duration::from_secs(60), Duration::from_millis(300));
    let cache = server.cache(options);
    let mouse = response("Mouse");
    cache.set(mouse.id, &mouse).await.unwrap();

    let mut conn = server.connection().await;
    let ttl_ms: i64 = redis::cmd("PTTL")
        .arg(cache_keys::product_by_id(mouse.id))
        .query_async(&mut conn)
        .await
        .unwrap();
    assert!(ttl_ms > 0 && ttl_ms <= 300);

    tokio::time::sleep(Duration::from_millis(700)).await;

    assert!(cache.get(mouse.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unreadable_entry_is_a_miss_and_discarded() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());
    let id = ProductId::new();
    let key = cache_keys::product_by_id(id);

    let mut conn = server.connection().await;
    let _: () = redis::cmd("SET")
        .arg(&key)
        .arg("not json")
        .query_async(&mut conn)
        .await
        .unwrap();

    assert!(cache.get(id).await.unwrap().is_none());
    assert!(!key_exists(&server, &key).await);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check_pings_server() {
    let server = TestRedis::new().await;
    let cache = server.cache(CacheEntryOptions::default());

    assert_eq!(cache.name(), "redis");
    assert!(cache.check().await.is_healthy());
}
