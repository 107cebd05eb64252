//! `VaultMock` HTTP server.
//!
//! Loads the bundled and externally supplied record datasets into a
//! [`vaultmock_core::Repository`] at startup and serves the read-only key
//! vault surface (`/secrets`, `/certificates`, `/keys`) over Axum.

pub mod config;
pub mod error;
pub mod loader;
pub mod routes;
pub mod state;
