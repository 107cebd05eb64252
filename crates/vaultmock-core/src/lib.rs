//! Core library for `VaultMock`.
//!
//! Holds the record model for the three vault families (secrets,
//! certificates, keys), the read-only in-memory [`Repository`], the version
//! resolver shared by all three families, and the per-family wire formatters.
//! This crate knows nothing about HTTP or where the records came from.

pub mod certificate;
pub mod error;
mod fields;
pub mod key;
pub mod repository;
pub mod resolver;
pub mod secret;
pub mod timestamp;
pub mod wire;

pub use certificate::{Certificate, CertificateProperties};
pub use error::ModelError;
pub use fields::Tags;
pub use key::{JsonWebKey, Key, KeyProperties};
pub use repository::{Collection, Repository};
pub use resolver::VersionedRecord;
pub use secret::{Secret, SecretProperties};
pub use timestamp::Timestamp;
