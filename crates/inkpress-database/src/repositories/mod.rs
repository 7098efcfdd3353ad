//! SQL for each table, as free functions over a PostgreSQL connection so
//! that every call runs inside the caller's transaction.

pub mod article;
pub mod author;
pub mod category;
pub mod comment;
pub mod file;
pub mod namespace;
pub mod tag;
