//! Principal extractors: pull the bearer token from the Authorization
//! header, validate it, and expose the acting [`Principal`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use inkpress_core::error::AppError;
use inkpress_entity::user::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated caller. Rejects requests without a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A caller that may be anonymous. A token that is present but invalid is
/// still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Principal>);

impl OptionalAuthUser {
    /// The principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

fn bearer_principal(parts: &Parts, state: &AppState) -> Result<Option<Principal>, AppError> {
    let Some(auth_header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let claims = state.tokens.decode(token)?;
    Ok(Some(claims.principal()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_principal(parts, state)?
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication("Missing Authorization header").into())
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(bearer_principal(parts, state)?))
    }
}
