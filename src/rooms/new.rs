use axum::{debug_handler, extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{auth::AuthUser, db::Room, AppError, AppResult};

use super::registry;

#[derive(Debug, Deserialize)]
pub(crate) struct NewRoomRequest {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewRoomResponse {
    pub message: String,
    pub id: Uuid,
    pub name: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_room(
    State(db_pool): State<SqlitePool>,
    user: AuthUser,
    payload: Result<Json<NewRoomRequest>, JsonRejection>,
) -> AppResult<Json<NewRoomResponse>> {
    let Json(NewRoomRequest { name }) = payload?;

    let room = create_room(&db_pool, &user, &name).await?;

    Ok(Json(NewRoomResponse {
        message: "room created".to_owned(),
        id: room.id,
        name: room.name,
    }))
}

pub async fn create_room(db_pool: &SqlitePool, owner: &AuthUser, name: &str) -> AppResult<Room> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::required("name"));
    }

    let room = registry::insert_room(db_pool, name, owner.id).await?;
    tracing::info!(room_id = %room.id, owner = %owner.id, "created room");

    Ok(room)
}
