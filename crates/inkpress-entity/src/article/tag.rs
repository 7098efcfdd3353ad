//! Tag entity model.

use inkpress_core::types::id::TagId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A free-form article tag. Names are unique and matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: TagId,
    /// Tag name.
    pub name: String,
}
