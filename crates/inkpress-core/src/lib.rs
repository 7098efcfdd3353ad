//! # inkpress-core
//!
//! Core crate for Inkpress. Contains configuration schemas, typed
//! identifiers, the path syntax of the content namespace, listing types,
//! the traits implemented by external collaborators (search indexing,
//! file lookup, comments), and the unified error system.
//!
//! This crate has **no** internal dependencies on other Inkpress crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
