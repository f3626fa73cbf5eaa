//! Logging and metrics installation.

use catalog_config::ObservabilityConfig;
use catalog_core::{CatalogError, CatalogResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(log_level: &str) -> String {
    format!("{log_level},tower_http={log_level}")
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// Installs the Prometheus recorder behind the `metrics` facade.
pub fn install_metrics_recorder() -> CatalogResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| CatalogError::Internal(format!("Failed to install metrics recorder: {}", e)))
}
