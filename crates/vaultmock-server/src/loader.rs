//! Boot-time dataset loading.
//!
//! Each record family starts from a dataset bundled into the binary, then
//! appends the records of an optional external file found in the directory
//! configured for that family. A source is applied all-or-nothing: if it
//! cannot be read, is not a JSON array, or any element fails to build, the
//! failure is logged and none of its records are appended. Failures never
//! abort startup and never affect the other families.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};

use vaultmock_core::{Certificate, Collection, Key, ModelError, Repository, Secret};

use crate::config::DataSources;

/// Errors from reading one dataset source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    /// The content is valid JSON but not an array of records.
    #[error("{origin} does not contain a JSON array")]
    NotAnArray { origin: String },

    /// One element of the array could not be turned into a record.
    #[error("invalid record at index {index} in {origin}: {source}")]
    Record {
        origin: String,
        index: usize,
        source: ModelError,
    },
}

/// The three record families and where their datasets live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Secrets,
    Certificates,
    Keys,
}

impl Family {
    /// Lowercase family name, used in log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Secrets => "secrets",
            Self::Certificates => "certificates",
            Self::Keys => "keys",
        }
    }

    /// File name looked up inside the family's external directory.
    #[must_use]
    pub const fn external_file_name(self) -> &'static str {
        match self {
            Self::Secrets => "test-secrets.json",
            Self::Certificates => "test-certificates.json",
            Self::Keys => "test-keys.json",
        }
    }

    /// Environment variable naming the family's external directory.
    #[must_use]
    pub const fn dir_var(self) -> &'static str {
        match self {
            Self::Secrets => "SECRETS_DIR",
            Self::Certificates => "CERTIFICATES_DIR",
            Self::Keys => "KEYS_DIR",
        }
    }

    /// The dataset compiled into the binary.
    #[must_use]
    pub const fn bundled(self) -> &'static str {
        match self {
            Self::Secrets => include_str!("../data/example-secrets.json"),
            Self::Certificates => include_str!("../data/example-certificates.json"),
            Self::Keys => include_str!("../data/example-keys.json"),
        }
    }

    const fn bundled_origin(self) -> &'static str {
        match self {
            Self::Secrets => "bundled example-secrets.json",
            Self::Certificates => "bundled example-certificates.json",
            Self::Keys => "bundled example-keys.json",
        }
    }
}

/// Build the repository from the bundled datasets plus any external files.
#[must_use]
pub fn load_repository(sources: &DataSources) -> Repository {
    let mut repository = Repository::new();
    load_family(
        &mut repository.secrets,
        Family::Secrets,
        sources.secrets_dir.as_deref(),
        Secret::from_value,
    );
    load_family(
        &mut repository.certificates,
        Family::Certificates,
        sources.certificates_dir.as_deref(),
        Certificate::from_value,
    );
    load_family(
        &mut repository.keys,
        Family::Keys,
        sources.keys_dir.as_deref(),
        Key::from_value,
    );
    repository
}

fn load_family<R>(
    collection: &mut Collection<R>,
    family: Family,
    external_dir: Option<&Path>,
    build: fn(&Value) -> Result<R, ModelError>,
) {
    apply(
        collection,
        family,
        parse_records(family.bundled(), family.bundled_origin(), build),
    );

    let Some(dir) = external_dir else {
        info!(
            family = family.label(),
            var = family.dir_var(),
            "no external directory configured"
        );
        return;
    };

    let path = external_path(dir, family);
    if !path.is_file() {
        warn!(
            family = family.label(),
            path = %path.display(),
            "external dataset file not found, skipping"
        );
        return;
    }

    apply(collection, family, read_records(&path, build));
}

fn apply<R>(collection: &mut Collection<R>, family: Family, loaded: Result<Vec<R>, LoadError>) {
    match loaded {
        Ok(records) => {
            info!(family = family.label(), count = records.len(), "loaded records");
            collection.extend(records);
        }
        Err(err) => {
            error!(family = family.label(), error = %err, "skipping dataset source");
        }
    }
}

/// Read a JSON array of records from a file.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or its content is
/// rejected by [`parse_records`].
pub fn read_records<R>(
    path: &Path,
    build: fn(&Value) -> Result<R, ModelError>,
) -> Result<Vec<R>, LoadError> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        origin: origin.clone(),
        source,
    })?;
    parse_records(&text, &origin, build)
}

/// Parse a JSON array of records.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for malformed JSON, [`LoadError::NotAnArray`]
/// when the top-level value is not an array, and [`LoadError::Record`] for
/// the first element that fails to build.
pub fn parse_records<R>(
    text: &str,
    origin: &str,
    build: fn(&Value) -> Result<R, ModelError>,
) -> Result<Vec<R>, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        origin: origin.to_owned(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(LoadError::NotAnArray {
            origin: origin.to_owned(),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            build(item).map_err(|source| LoadError::Record {
                origin: origin.to_owned(),
                index,
                source,
            })
        })
        .collect()
}

/// Path of a family's external file inside `dir`.
#[must_use]
pub fn external_path(dir: &Path, family: Family) -> PathBuf {
    dir.join(family.external_file_name())
}
