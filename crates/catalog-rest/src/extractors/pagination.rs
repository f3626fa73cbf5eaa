//! Pagination query parameters.

use catalog_core::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for paged listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<usize>,
    /// Items per page, at most 100.
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}
