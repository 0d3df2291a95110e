#![allow(dead_code)]

use std::{str::FromStr, time::Duration};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use minichat::{
    auth::{register_identity, Hasher, Keys},
    db, AppState,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &[u8] = b"my_secret_key_123";
pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// One connection, so the in-memory database lives as long as the pool.
pub async fn test_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::migrate(&db_pool).await.unwrap();

    AppState {
        db_pool,
        keys: Keys::new(SECRET, DAY),
        hasher: Hasher::new(4),
    }
}

/// Registers `username` and returns its id plus a fresh token.
pub async fn registered(app_state: &AppState, username: &str) -> (Uuid, String) {
    let uid = register_identity(
        &app_state.db_pool,
        &app_state.hasher,
        username,
        &format!("{username}@x.com"),
        "pw123".to_owned(),
    )
    .await
    .unwrap();
    let token = app_state.keys.issue(uid, username).unwrap();
    (uid, token)
}

pub async fn count(app_state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&app_state.db_pool)
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    send(app, request.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
