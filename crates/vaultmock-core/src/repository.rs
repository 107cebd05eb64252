//! In-memory, read-only record store.
//!
//! A [`Repository`] is built once at boot by appending records to its three
//! collections, then shared immutably for the life of the process. There is
//! no index: every lookup is a linear scan in insertion order.

use crate::certificate::Certificate;
use crate::key::Key;
use crate::resolver::{self, VersionedRecord};
use crate::secret::Secret;

/// An insertion-ordered list of records of one family.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Collection<R> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append one record at the end.
    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: VersionedRecord> Collection<R> {
    /// Resolve `name` at `version`, or its latest version when `version` is
    /// `None`. See [`resolver::resolve`].
    pub fn resolve(&self, name: &str, version: Option<&str>) -> Option<&R> {
        resolver::resolve(&self.records, name, version)
    }

    /// Every version of `name`, in insertion order.
    pub fn versions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a R> {
        resolver::versions(&self.records, name)
    }
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> From<Vec<R>> for Collection<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R> Extend<R> for Collection<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<R> FromIterator<R> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The three record collections served by the mock vault.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repository {
    pub secrets: Collection<Secret>,
    pub certificates: Collection<Certificate>,
    pub keys: Collection<Key>,
}

impl Repository {
    /// Create a repository with three empty collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secret(name: &str, version: &str, updated_on: &str) -> Secret {
        Secret::from_value(&json!({
            "value": format!("{name}-{version}"),
            "properties": { "name": name, "version": version, "updatedOn": updated_on }
        }))
        .unwrap()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut secrets = Collection::new();
        secrets.append(secret("a", "1", "2023-01-01T00:00:00Z"));
        secrets.append(secret("b", "1", "2023-01-01T00:00:00Z"));
        let names: Vec<_> = secrets.iter().filter_map(VersionedRecord::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(secrets.len(), 2);
    }

    #[test]
    fn resolves_latest_by_updated_on() {
        let secrets: Collection<_> = vec![
            secret("foo", "v1", "2023-01-01T00:00:00Z"),
            secret("foo", "v2", "2023-01-01T00:00:10Z"),
        ]
        .into();
        let latest = secrets.resolve("foo", None).unwrap();
        assert_eq!(latest.version(), Some("v2"));
        assert_eq!(
            secrets.resolve("foo", Some("v1")).unwrap().value.as_deref(),
            Some("foo-v1")
        );
    }

    #[test]
    fn versions_filters_by_name() {
        let secrets: Collection<_> = vec![
            secret("foo", "v1", "2023-01-01T00:00:00Z"),
            secret("bar", "v1", "2023-01-01T00:00:00Z"),
            secret("foo", "v2", "2023-01-01T00:00:00Z"),
        ]
        .into();
        let versions: Vec<_> = secrets.versions("foo").filter_map(VersionedRecord::version).collect();
        assert_eq!(versions, ["v1", "v2"]);
        assert_eq!(secrets.versions("missing").count(), 0);
    }

    #[test]
    fn extend_appends_after_existing_records() {
        let mut secrets: Collection<_> = vec![secret("a", "1", "2023-01-01T00:00:00Z")].into();
        secrets.extend(vec![secret("a", "2", "2023-01-01T00:00:00Z")]);
        assert_eq!(secrets.as_slice()[1].version(), Some("2"));
    }

    #[test]
    fn new_repository_is_empty() {
        let repo = Repository::new();
        assert!(repo.secrets.is_empty());
        assert!(repo.certificates.is_empty());
        assert!(repo.keys.is_empty());
    }
}
