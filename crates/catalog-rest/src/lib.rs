//! # Catalog REST
//!
//! REST API layer using Axum. Maps HTTP requests onto the product service
//! and service results onto status codes:
//!
//! - `/api/v1/products` full CRUD, also served unversioned at `/api/products`
//! - `/api/v2/products` paged listing and lookup by ID
//! - `/health`, `/live`, `/ready` health endpoints and Swagger UI at `/swagger-ui`

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
