//! # Catalog Domain
//!
//! Domain entities for the catalog service. Entities are created through
//! validated constructors; store adapters rehydrate them from plain records.

pub mod entities;

pub use entities::*;
