//! The shared category/article namespace.

pub mod slot;

pub use slot::{NamespaceEntry, Slot};
