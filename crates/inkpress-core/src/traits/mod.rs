//! Traits defined in `inkpress-core` and implemented by collaborator crates.

pub mod comments;
pub mod file_resolver;
pub mod indexer;

pub use comments::CommentCascade;
pub use file_resolver::FileResolver;
pub use indexer::{SearchDocument, SearchIndexer};
