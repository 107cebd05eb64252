//! Certificates routes: `/certificates/*`
//!
//! - `GET /certificates/{name}/versions` — every version of `name`, in
//!   dataset order
//! - `GET /certificates/{name}/{version}` — one version as a certificate
//!   bundle
//!
//! Both responses report dates as Unix seconds. The static `versions`
//! segment takes priority, so a certificate whose version is literally
//! `versions` cannot be fetched individually.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use vaultmock_core::wire::{CertificateBundle, CertificateVersions};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/certificates` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{name}/versions", get(list_certificate_versions))
        .route("/{name}/{version}", get(get_certificate_version))
}

async fn list_certificate_versions(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CertificateVersions>, AppError> {
    let versions: CertificateVersions = state.repository.certificates.versions(&name).collect();

    // An unknown name is a 404, never an empty listing.
    if versions.value.is_empty() {
        return Err(AppError::CertificateNotFound);
    }
    Ok(Json(versions))
}

async fn get_certificate_version(
    State(state): State<Arc<AppState>>,
    Path((name, version)): Path<(String, String)>,
) -> Result<Json<CertificateBundle>, AppError> {
    state
        .repository
        .certificates
        .resolve(&name, Some(&version))
        .map(|cert| Json(CertificateBundle::from(cert)))
        .ok_or(AppError::CertificateVersionNotFound)
}
