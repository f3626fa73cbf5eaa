//! Service implementations.

pub mod product_service_impl;

pub use product_service_impl::ProductServiceImpl;
