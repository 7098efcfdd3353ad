//! Category use cases.

pub mod service;
pub mod view;

pub use service::{CategoryService, CreateCategory, DeleteSummary, UpdateCategory};
pub use view::CategoryView;
