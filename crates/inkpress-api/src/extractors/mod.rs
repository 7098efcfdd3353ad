//! Custom Axum extractors.

pub mod auth;
pub mod listing;
pub mod path;

pub use auth::{AuthUser, OptionalAuthUser};
pub use listing::ListingParams;
pub use path::PathQuery;
