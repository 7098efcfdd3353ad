//! Author (editor account) entity.

use inkpress_core::types::id::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An editor account that can be credited on articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    /// Account identifier.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub display_name: String,
}
