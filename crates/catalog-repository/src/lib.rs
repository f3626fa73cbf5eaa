//! # Catalog Repository
//!
//! The product store: the durable source of truth behind the cache.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>   (store interface)
//! PgProductRepository               (PostgreSQL / SQLx)
//! InMemoryProductRepository         (process-local, injected component)
//! ```

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
