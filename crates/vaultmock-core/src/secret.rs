//! Secret records.
//!
//! A secret is a payload string plus [`SecretProperties`]. Secrets are
//! served back in the same shape they are stored, so the `Serialize` impls
//! here are also the wire format for `GET /secrets/...`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::fields::{self, Tags};
use crate::resolver::{self, VersionedRecord};
use crate::timestamp::Timestamp;

/// Identity, versioning, and metadata of a secret.
///
/// Every field is always serialized; absent values render as `null` and
/// `tags` as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProperties {
    pub id: Option<String>,
    pub version: Option<String>,
    pub enabled: Option<bool>,
    pub not_before: Option<Timestamp>,
    pub expires_on: Option<Timestamp>,
    pub created_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
    pub name: Option<String>,
    pub recovery_level: Option<Value>,
    pub content_type: Option<String>,
    pub tags: Tags,
    pub key_id: Option<String>,
    pub managed: Option<bool>,
    pub recoverable_days: Option<Value>,
}

impl SecretProperties {
    /// Build properties from a JSON value. A non-object yields all defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let map = fields::object_or_empty(value);
        Self {
            id: fields::string(&map, "id"),
            version: fields::string(&map, "version"),
            enabled: fields::boolean(&map, "enabled"),
            not_before: fields::timestamp(&map, "notBefore"),
            expires_on: fields::timestamp(&map, "expiresOn"),
            created_on: fields::timestamp(&map, "createdOn"),
            updated_on: fields::timestamp(&map, "updatedOn"),
            name: fields::string(&map, "name"),
            recovery_level: fields::passthrough(&map, "recoveryLevel"),
            content_type: fields::string(&map, "contentType"),
            tags: fields::tags(&map, "tags"),
            key_id: fields::string(&map, "keyId"),
            managed: fields::boolean(&map, "managed"),
            recoverable_days: fields::passthrough(&map, "recoverableDays"),
        }
    }
}

/// A stored secret version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Secret {
    pub value: Option<String>,
    pub properties: Option<SecretProperties>,
}

impl Secret {
    /// Build a secret from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NullRecord`] if `value` is `null`.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        if value.is_null() {
            return Err(ModelError::NullRecord { kind: "secret" });
        }
        let map = fields::object_or_empty(value);
        Ok(Self {
            value: fields::string(&map, "value"),
            properties: fields::nested(&map, "properties").map(SecretProperties::from_value),
        })
    }

    /// Parse a secret from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] for malformed JSON and
    /// [`ModelError::NullRecord`] for the literal `null`.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }
}

impl VersionedRecord for Secret {
    fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.name.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.properties.as_ref()?.version.as_deref()
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        let props = self.properties.as_ref()?;
        resolver::effective_timestamp(props.updated_on.as_ref(), props.created_on.as_ref())
    }
}
