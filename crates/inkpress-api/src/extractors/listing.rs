//! Listing query parameters.

use serde::{Deserialize, Serialize};

use inkpress_core::types::{PageRequest, SortDirection};
use inkpress_service::ArticleListing;

/// `?direction=desc&limit=10&offset=20`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingParams {
    /// Chronological direction, `asc` (default) or `desc`.
    #[serde(default)]
    pub direction: SortDirection,
    /// Maximum number of articles.
    pub limit: Option<u64>,
    /// Articles to skip.
    #[serde(default)]
    pub offset: u64,
}

impl ListingParams {
    /// Converts to the service listing request.
    pub fn into_listing(self) -> ArticleListing {
        ArticleListing {
            direction: self.direction,
            page: PageRequest::new(self.limit, self.offset),
        }
    }
}
