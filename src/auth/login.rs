use axum::{debug_handler, extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{appresult::BAD_CREDENTIALS, AppError, AppResult};

use super::{identities, non_blank, password::check_password, Hasher, Keys};

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    State(hasher): State<Hasher>,
    State(keys): State<Keys>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(LoginRequest { email, password }) = payload?;

    let (token, username) = authenticate(&db_pool, &hasher, &keys, &email, password).await?;

    Ok(Json(LoginResponse {
        message: "logged in".to_owned(),
        token,
        username,
    }))
}

/// Checks the credentials and mints a token. Unknown email and wrong password
/// are indistinguishable to the caller.
pub async fn authenticate(
    db_pool: &SqlitePool,
    hasher: &Hasher,
    keys: &Keys,
    email: &str,
    password: String,
) -> AppResult<(String, String)> {
    let email = non_blank("email", email)?;
    check_password(&password)?;

    let Some(identity) = identities::identity_by_email(db_pool, email).await? else {
        tracing::debug!("login for unknown email");
        hasher.verify_nothing(password).await?;
        return Err(AppError::Auth(BAD_CREDENTIALS));
    };

    if !hasher.verify(password, identity.password_hash).await? {
        tracing::debug!(uid = %identity.id, "login with wrong password");
        return Err(AppError::Auth(BAD_CREDENTIALS));
    }

    let token = keys
        .issue(identity.id, &identity.username)
        .map_err(|err| anyhow::Error::from(err).context("signing token"))?;

    tracing::info!(uid = %identity.id, "logged in");
    Ok((token, identity.username))
}
