//! The content addressing engine.
//!
//! Every function here runs inside a caller-supplied [`ContentTx`], so a
//! conflict check and the write that follows it share one transaction.
//!
//! [`ContentTx`]: inkpress_database::ContentTx

pub mod cache;
pub mod conflict;
pub mod ordering;
pub mod reparent;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheAudit, StaleEntry};
pub use conflict::assert_no_conflict;
pub use ordering::{ArticleListing, list_articles, list_subcategories, order_articles};
pub use reparent::{relocate, reparent};
pub use resolver::{article_path, full_path, resolve_article, resolve_category};
