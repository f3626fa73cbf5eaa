//! # Catalog Config
//!
//! Configuration management for the catalog service.
//! Supports layered configuration from files and environment variables,
//! validated fail-fast when loaded.

mod app_config;
mod backend;
mod loader;
mod validation;

pub use app_config::*;
pub use backend::*;
pub use loader::*;
pub use validation::*;
