//! Version resolution shared by secrets, certificates, and keys.
//!
//! Lookups are linear scans over a collection. A record that has no
//! properties reports no name, so it can never be matched.
//!
//! "Latest" means the record with the greatest recency timestamp. Records
//! with no usable timestamp rank as [`DateTime::<Utc>::MIN_UTC`]. On ties the
//! record that appears first in the collection wins.

use chrono::{DateTime, Utc};

use crate::timestamp::Timestamp;

/// A record addressable by name and version.
pub trait VersionedRecord {
    /// The record's name, if it has properties and a name.
    fn name(&self) -> Option<&str>;

    /// The record's version, if it has properties and a version.
    fn version(&self) -> Option<&str>;

    /// The instant used to rank versions of the same name.
    ///
    /// `None` means the record has no usable timestamp.
    fn recency(&self) -> Option<DateTime<Utc>>;
}

/// `updatedOn` when present, else `createdOn`.
///
/// A present but invalid `updatedOn` does not fall back to `createdOn`.
pub fn effective_timestamp(
    updated_on: Option<&Timestamp>,
    created_on: Option<&Timestamp>,
) -> Option<DateTime<Utc>> {
    updated_on.or(created_on).and_then(Timestamp::instant)
}

/// Resolve `name` at an explicit `version`, or its latest version when
/// `version` is `None`.
pub fn resolve<'a, R: VersionedRecord>(
    records: &'a [R],
    name: &str,
    version: Option<&str>,
) -> Option<&'a R> {
    match version {
        Some(version) => find_version(records, name, version),
        None => find_latest(records, name),
    }
}

/// First record whose name and version both match exactly.
pub fn find_version<'a, R: VersionedRecord>(
    records: &'a [R],
    name: &str,
    version: &str,
) -> Option<&'a R> {
    records
        .iter()
        .find(|r| r.name() == Some(name) && r.version() == Some(version))
}

/// The most recent record named `name`; first in collection order on ties.
pub fn find_latest<'a, R: VersionedRecord>(records: &'a [R], name: &str) -> Option<&'a R> {
    let mut latest: Option<(&'a R, DateTime<Utc>)> = None;
    for record in versions(records, name) {
        let ts = record.recency().unwrap_or(DateTime::<Utc>::MIN_UTC);
        match latest {
            Some((_, best)) if ts <= best => {}
            _ => latest = Some((record, ts)),
        }
    }
    latest.map(|(record, _)| record)
}

/// Every record named `name`, in collection order.
pub fn versions<'a, 'n, R: VersionedRecord>(
    records: &'a [R],
    name: &'n str,
) -> impl Iterator<Item = &'a R> {
    records.iter().filter(move |r| r.name() == Some(name))
}
