//! Shared application state for `VaultMock` server.
//!
//! A single [`AppState`] is constructed at startup, after every dataset has
//! been loaded, and shared across all Axum handlers via `Arc`. Nothing
//! mutates it afterwards, so handlers read it without locking.

use vaultmock_core::Repository;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug, Default)]
pub struct AppState {
    /// Every secret, certificate, and key served by the mock vault.
    pub repository: Repository,
}

impl AppState {
    #[must_use]
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}
