pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod rooms;

use std::{future::Future, io};

use axum::{extract::FromRef, http::{header, Method}, Router};
use sqlx::SqlitePool;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

/// Everything a request may touch. Built once at startup; handlers pull
/// the pieces they need through `FromRef`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub keys: auth::Keys,
    pub hasher: auth::Hasher,
}

impl AppState {
    pub fn new(config: &Config, db_pool: SqlitePool) -> AppState {
        AppState {
            db_pool,
            keys: auth::Keys::new(config.jwt_secret.as_bytes(), config.token_ttl),
            hasher: auth::Hasher::new(config.bcrypt_cost),
        }
    }
}

pub fn identity_app(app_state: AppState) -> Router {
    service(auth::router(), app_state)
}

pub fn room_app(app_state: AppState) -> Router {
    service(rooms::router(), app_state)
}

fn service(router: Router<AppState>, app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Resolves when `signal` fires. If the signal cannot be installed the
/// error is logged and this never resolves, so the server keeps running.
pub async fn wait_for_shutdown(signal: impl Future<Output = io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
