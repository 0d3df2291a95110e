use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::{stored_timestamp, Identity};

pub(crate) async fn insert_identity(
    db_pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::now_v7();
    let now = stored_timestamp(OffsetDateTime::now_utc())?;

    sqlx::query("INSERT INTO identities (id,username,email,password_hash,created_at,updated_at) VALUES (?,?,?,?,?,?)")
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .bind(&now)
        .execute(db_pool)
        .await?;

    Ok(id)
}

pub(crate) async fn identity_by_email(
    db_pool: &SqlitePool,
    email: &str,
) -> Result<Option<Identity>, sqlx::Error> {
    sqlx::query_as("SELECT id,username,email,password_hash,created_at,updated_at FROM identities WHERE email=?")
        .bind(email)
        .fetch_optional(db_pool)
        .await
}

pub async fn identity_by_id(
    db_pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Identity>, sqlx::Error> {
    sqlx::query_as("SELECT id,username,email,password_hash,created_at,updated_at FROM identities WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}
