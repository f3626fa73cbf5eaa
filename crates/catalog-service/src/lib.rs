//! # Catalog Service
//!
//! The product service and its cache-aside layer. [`ProductService`] is the
//! only component that knows how reads are served from cache and how writes
//! invalidate it; the API layer and the store never talk to the cache.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod telemetry;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::*;
