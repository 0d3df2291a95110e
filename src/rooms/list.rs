use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{db::Room, AppResult};

use super::registry;

#[derive(Serialize)]
pub(crate) struct RoomList {
    rooms: Vec<Room>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_rooms(State(db_pool): State<SqlitePool>) -> AppResult<Json<RoomList>> {
    Ok(Json(RoomList {
        rooms: registry::all_rooms(&db_pool).await?,
    }))
}
