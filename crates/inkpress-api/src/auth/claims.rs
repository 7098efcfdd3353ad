//! JWT claims carried by access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inkpress_core::types::id::UserId;
use inkpress_entity::user::{Principal, UserRole};

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Login name, used as the author handle.
    pub username: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The acting principal described by these claims.
    pub fn principal(&self) -> Principal {
        Principal::new(UserId::from_uuid(self.sub), self.username.clone(), self.role)
    }
}
