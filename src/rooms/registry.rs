use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::{stored_timestamp, Room};

pub async fn insert_room(
    db_pool: &SqlitePool,
    name: &str,
    owner_id: Uuid,
) -> Result<Room, sqlx::Error> {
    insert_room_at(db_pool, name, owner_id, OffsetDateTime::now_utc()).await
}

pub async fn insert_room_at(
    db_pool: &SqlitePool,
    name: &str,
    owner_id: Uuid,
    created_at: OffsetDateTime,
) -> Result<Room, sqlx::Error> {
    let room = Room {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        owner_id,
        created_at,
    };

    sqlx::query("INSERT INTO rooms (id,name,owner_id,created_at) VALUES (?,?,?,?)")
        .bind(room.id)
        .bind(&room.name)
        .bind(room.owner_id)
        .bind(stored_timestamp(room.created_at)?)
        .execute(db_pool)
        .await?;

    Ok(room)
}

/// Every room, newest first. v7 ids break ties within a clock tick.
pub async fn all_rooms(db_pool: &SqlitePool) -> Result<Vec<Room>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,owner_id,created_at FROM rooms ORDER BY created_at DESC, id DESC")
        .fetch_all(db_pool)
        .await
}
