//! Keys routes: `/keys/*`
//!
//! - `GET /keys/{name}` — latest version by `createdOn` only
//! - `GET /keys/{name}/{version}` — exact version
//!
//! Keys are returned in their stored shape with ISO-8601 dates.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use vaultmock_core::Key;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/keys` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{name}", get(get_latest_key))
        .route("/{name}/{version}", get(get_key_version))
}

async fn get_latest_key(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Key>, AppError> {
    lookup(&state, &name, None)
}

async fn get_key_version(
    State(state): State<Arc<AppState>>,
    Path((name, version)): Path<(String, String)>,
) -> Result<Json<Key>, AppError> {
    lookup(&state, &name, Some(&version))
}

fn lookup(state: &AppState, name: &str, version: Option<&str>) -> Result<Json<Key>, AppError> {
    state
        .repository
        .keys
        .resolve(name, version)
        .cloned()
        .map(Json)
        .ok_or(AppError::KeyNotFound)
}
