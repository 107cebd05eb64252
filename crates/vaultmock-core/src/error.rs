//! Error types for `vaultmock-core`.
//!
//! Record construction is lenient: unknown fields are dropped and mistyped
//! fields fall back to their defaults. The only hard failures are malformed
//! JSON text and a record that is `null` as a whole.

/// Errors from constructing a record out of JSON input.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The input text is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The record itself was `null`. A record needs at least an empty object.
    #[error("{kind} record must not be null")]
    NullRecord { kind: &'static str },
}
