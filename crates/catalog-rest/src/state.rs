//! Application state for Axum handlers.

use catalog_core::HealthCheck;
use catalog_service::ProductService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    /// Dependencies checked by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>) -> Self {
        Self {
            product_service,
            health_checks: Vec::new(),
        }
    }

    /// Adds a dependency to the readiness check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
