//! Principal and author entities.

pub mod author;
pub mod principal;
pub mod role;

pub use author::Author;
pub use principal::Principal;
pub use role::UserRole;
