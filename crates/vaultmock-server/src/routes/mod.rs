//! HTTP route handlers.
//!
//! Endpoints mirror the key vault REST surface used by the vault SDK
//! clients, minus the `/api-version` negotiation (query strings are
//! ignored).

pub mod certificates;
pub mod health;
pub mod keys;
pub mod secrets;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/secrets", secrets::router())
        .nest("/certificates", certificates::router())
        .nest("/keys", keys::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
