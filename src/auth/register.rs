use axum::{debug_handler, extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult};

use super::{identities, non_blank, password::check_password, Hasher};

#[derive(Deserialize)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub uid: Uuid,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    State(hasher): State<Hasher>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<RegisterResponse>> {
    let Json(RegisterRequest { username, email, password }) = payload?;

    let uid = register_identity(&db_pool, &hasher, &username, &email, password).await?;

    Ok(Json(RegisterResponse {
        message: "registered".to_owned(),
        uid,
    }))
}

/// Stores a new identity with a bcrypt hash of `password`. A taken username
/// or email both come back as the same [`AppError::Conflict`].
pub async fn register_identity(
    db_pool: &SqlitePool,
    hasher: &Hasher,
    username: &str,
    email: &str,
    password: String,
) -> AppResult<Uuid> {
    let username = non_blank("username", username)?;
    let email = non_blank("email", email)?;
    check_password(&password)?;

    let password_hash = hasher.hash(password).await?;

    match identities::insert_identity(db_pool, username, email, &password_hash).await {
        Ok(uid) => {
            tracing::info!(%uid, "registered identity");
            Ok(uid)
        }
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            tracing::debug!("registration collided with an existing identity");
            Err(AppError::Conflict)
        }
        Err(err) => Err(err.into()),
    }
}
