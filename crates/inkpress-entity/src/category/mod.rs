//! Category domain entities.

pub mod model;
pub mod tree;

pub use model::{Category, CategoryPatch, CategoryViewType, NewCategory, SortingType};
pub use tree::CategoryNode;
