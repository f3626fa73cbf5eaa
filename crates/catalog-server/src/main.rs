//! # Catalog Server
//!
//! Main entry point for the catalog service.

use axum::routing::get;
use catalog_config::{AppConfig, ConfigLoader};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::DatabasePoolInterface;
use catalog_rest::{create_router, AppState};
use catalog_server::{
    di::build_catalog_module,
    observability::{init_logging, install_metrics_recorder},
    startup::{print_banner, print_startup_info, seed_if_empty},
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Logging needs the configured level, so configuration errors go to stderr.
    let config = match ConfigLoader::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Catalog Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CatalogResult<()> {
    let metrics = if config.observability.metrics_enabled {
        Some(install_metrics_recorder()?)
    } else {
        None
    };

    let components = build_catalog_module(&config).await?;
    let product_service = components.product_service();

    if config.database.seed_on_empty {
        seed_if_empty(components.product_repository().as_ref(), product_service.as_ref()).await?;
    }

    let state = components
        .health_checks
        .iter()
        .cloned()
        .fold(AppState::new(product_service), AppState::with_health_check);

    let mut router = create_router(state, &config.server);
    if let Some(handle) = metrics {
        router = router.route(
            &config.observability.metrics_path,
            get(move || async move { handle.render() }),
        );
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);
    info!("Starting REST server on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Internal(format!("REST server error: {}", e)))?;

    if let Some(database) = components.database {
        database.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
