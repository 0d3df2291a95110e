mod list;
mod new;
pub mod registry;

use axum::{routing::get, Router};

use crate::AppState;

pub use new::{create_room, NewRoomResponse};

/// Room service: `GET /rooms` is public, `POST /rooms` needs a bearer token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list::list_rooms).post(new::new_room))
}
