use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::{appresult::{INVALID_TOKEN, MISSING_TOKEN}, AppError, AppResult};

use super::Keys;

/// Caller identity, proven by a verified bearer token. Taking this as a
/// handler argument makes the route protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    Keys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &Keys::from_ref(state))
    }
}

pub fn authenticate(headers: &HeaderMap, keys: &Keys) -> AppResult<AuthUser> {
    let token = bearer_token(headers).ok_or(AppError::Auth(MISSING_TOKEN))?;

    let claims = keys.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "rejected token");
        AppError::Auth(INVALID_TOKEN)
    })?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Auth(INVALID_TOKEN))?;

    Ok(AuthUser { id, username: claims.username })
}

/// `Authorization: Bearer <token>`, exactly two parts.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    match header.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Some(*token),
        _ => None,
    }
}
