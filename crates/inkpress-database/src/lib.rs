//! # inkpress-database
//!
//! Transactional content stores for Inkpress. The [`ContentStore`] trait
//! hands out [`ContentTx`] units of work; two backends implement it:
//!
//! - [`PgContentStore`]: PostgreSQL through sqlx, writes at `SERIALIZABLE`.
//! - [`MemoryContentStore`]: process-local copy-on-write state guarded by
//!   tokio locks, used for tests and single-node embedded runs.
//!
//! Both enforce slot uniqueness themselves, independently of any check made
//! by the caller.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryCommentCascade, MemoryContentStore, MemoryFileResolver};
pub use postgres::{PgCommentCascade, PgContentStore, PgFileResolver};
pub use store::{ContentStore, ContentTx, TxMode};
