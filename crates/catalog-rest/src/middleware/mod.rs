//! HTTP middleware.

mod logging;
mod versioning;

pub use logging::*;
pub use versioning::*;
