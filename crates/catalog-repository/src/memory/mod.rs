//! Process-local store implementations.

mod product_repository;

pub use product_repository::InMemoryProductRepository;
