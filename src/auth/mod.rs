use axum::{routing::post, Router};

use crate::{AppError, AppResult, AppState};

mod gate;
pub mod identities;
mod login;
mod password;
mod register;
pub mod token;

pub use gate::AuthUser;
pub use login::{authenticate, LoginResponse};
pub use password::Hasher;
pub use register::{register_identity, RegisterResponse};
pub use token::{Claims, Keys};

/// Identity service: `POST /register`, `POST /login`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
}

pub(crate) fn non_blank<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(value)
}
