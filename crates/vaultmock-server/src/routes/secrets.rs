//! Secrets routes: `/secrets/*`
//!
//! - `GET /secrets/{name}` — latest version by `updatedOn`, else `createdOn`
//! - `GET /secrets/{name}/{version}` — exact version

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use vaultmock_core::Secret;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/secrets` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{name}", get(get_latest_secret))
        .route("/{name}/{version}", get(get_secret_version))
}

async fn get_latest_secret(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Secret>, AppError> {
    state
        .repository
        .secrets
        .resolve(&name, None)
        .cloned()
        .map(Json)
        .ok_or(AppError::SecretNotFound)
}

async fn get_secret_version(
    State(state): State<Arc<AppState>>,
    Path((name, version)): Path<(String, String)>,
) -> Result<Json<Secret>, AppError> {
    state
        .repository
        .secrets
        .resolve(&name, Some(&version))
        .cloned()
        .map(Json)
        .ok_or(AppError::SecretNotFound)
}
