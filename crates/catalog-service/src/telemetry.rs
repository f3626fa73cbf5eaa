//! Cache counters exported through the `metrics` facade.
//!
//! Nothing is recorded unless the server installs a recorder.

use metrics::counter;

/// Cache scope label for single-product entries.
pub const SCOPE_ENTITY: &str = "entity";

/// Cache scope label for the all-products entry.
pub const SCOPE_AGGREGATE: &str = "aggregate";

pub fn record_cache_hit(scope: &'static str) {
    counter!("catalog_cache_hits_total", "scope" => scope).increment(1);
}

pub fn record_cache_miss(scope: &'static str) {
    counter!("catalog_cache_misses_total", "scope" => scope).increment(1);
}

/// Counts a cache failure that was swallowed. `operation` names the cache call.
pub fn record_cache_error(operation: &'static str) {
    counter!("catalog_cache_errors_total", "operation" => operation).increment(1);
}
