//! # Catalog Server Library
//!
//! Dependency wiring, observability setup and startup helpers for the
//! catalog server binary.

pub mod di;
pub mod observability;
pub mod startup;
