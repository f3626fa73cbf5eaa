//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use catalog_core::CatalogError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "CATALOG";

/// Loads the application configuration once, at startup.
///
/// The loaded configuration is immutable for the life of the process.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates configuration from `config_dir`.
    ///
    /// Sources are applied in order, later ones overriding earlier ones:
    /// 1. `default.toml`
    /// 2. `{environment}.toml`
    /// 3. `local.toml`, not committed
    /// 4. Environment variables with `CATALOG_` prefix and `__` separator
    pub fn load(config_dir: impl AsRef<Path>) -> Result<AppConfig, CatalogError> {
        Self::load_config(config_dir.as_ref())
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<AppConfig, CatalogError> {
        Self::load("./config")
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, CatalogError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{ENV_PREFIX}_ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_catalog_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| CatalogError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
