//! Key records.
//!
//! A key is JSON Web Key material plus [`KeyProperties`]. Keys are served in
//! their stored shape with dates as ISO-8601 text. Unlike secrets and
//! certificates, absent property fields are omitted from the output rather
//! than rendered as `null`, and "latest" is ranked by `createdOn` alone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::fields::{self, Tags};
use crate::resolver::VersionedRecord;
use crate::timestamp::Timestamp;

/// Public and private key material (RFC 7517).
///
/// Empty or absent components are omitted on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsonWebKey {
    /// Key type: `RSA`, `RSA-HSM`, `EC`, `EC-HSM`, `oct`, `oct-HSM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// RSA modulus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// RSA private exponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    /// Symmetric key bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// EC public key X coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC public key Y coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// EC curve: `P-256`, `P-384`, `P-521`, `P-256K`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
}

impl JsonWebKey {
    /// Build key material from a JSON value. A non-object yields all defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let map = fields::object_or_empty(value);
        let component = |name: &str| fields::non_empty_string(&map, name);
        Self {
            kty: component("kty"),
            key_ops: fields::string_list(&map, "key_ops"),
            kid: component("kid"),
            n: component("n"),
            e: component("e"),
            d: component("d"),
            p: component("p"),
            q: component("q"),
            dp: component("dp"),
            dq: component("dq"),
            qi: component("qi"),
            k: component("k"),
            x: component("x"),
            y: component("y"),
            crv: component("crv"),
        }
    }
}

/// Identity, versioning, and metadata of a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub tags: Tags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_policy: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recoverable_days: Option<Value>,
}

impl KeyProperties {
    /// Build properties from a JSON value. A non-object yields all defaults.
    ///
    /// Identity strings that are empty count as absent, and the boolean flags
    /// are only kept when they are JSON booleans.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let map = fields::object_or_empty(value);
        Self {
            kid: fields::non_empty_string(&map, "kid"),
            id: fields::non_empty_string(&map, "id"),
            created_on: fields::timestamp(&map, "createdOn"),
            updated_on: fields::timestamp(&map, "updatedOn"),
            not_before: fields::timestamp(&map, "notBefore"),
            expires_on: fields::timestamp(&map, "expiresOn"),
            enabled: fields::boolean(&map, "enabled"),
            tags: fields::tags(&map, "tags"),
            vault_url: fields::non_empty_string(&map, "vaultUrl"),
            name: fields::non_empty_string(&map, "name"),
            version: fields::non_empty_string(&map, "version"),
            exportable: fields::boolean(&map, "exportable"),
            release_policy: fields::passthrough(&map, "releasePolicy"),
            recovery_level: fields::passthrough(&map, "recoveryLevel"),
            recoverable_days: fields::passthrough(&map, "recoverableDays"),
        }
    }
}

/// A stored key version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Key {
    pub key: Option<JsonWebKey>,
    pub properties: Option<KeyProperties>,
}

impl Key {
    /// Build a key from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NullRecord`] if `value` is `null`.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        if value.is_null() {
            return Err(ModelError::NullRecord { kind: "key" });
        }
        let map = fields::object_or_empty(value);
        Ok(Self {
            key: fields::nested(&map, "key").map(JsonWebKey::from_value),
            properties: fields::nested(&map, "properties").map(KeyProperties::from_value),
        })
    }

    /// Parse a key from JSON text.
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

impl VersionedRecord for Key {
    fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.name.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.properties.as_ref()?.version.as_deref()
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.properties
            .as_ref()?
            .created_on
            .as_ref()
            .and_then(Timestamp::instant)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_rsa_key_with_properties() {
        let key = Key::from_value(&json!({
            "key": { "kty": "RSA", "n": "modulus", "e": "AQAB", "key_ops": ["sign", "verify"] },
            "properties": {
                "kid": "key-id",
                "name": "my-key",
                "version": "v1",
                "createdOn": "2023-01-01T00:00:00.000Z",
                "enabled": true,
                "tags": { "env": "test" }
            }
        }))
        .unwrap();

        let jwk = key.key.as_ref().unwrap();
        assert_eq!(jwk.kty.as_deref(), Some("RSA"));
        assert_eq!(jwk.key_ops.as_deref(), Some(&["sign".to_owned(), "verify".to_owned()][..]));
        let props = key.properties.as_ref().unwrap();
        assert_eq!(props.kid.as_deref(), Some("key-id"));
        assert_eq!(props.enabled, Some(true));
        assert_eq!(key.name(), Some("my-key"));
    }

    #[test]
    fn serializes_only_present_fields() {
        let key = Key::from_value(&json!({
            "key": { "kty": "RSA", "n": "modulus", "e": "AQAB" },
            "properties": {
                "kid": "key-id",
                "createdOn": "2023-01-01T00:00:00.000Z",
                "enabled": false,
                "tags": { "env": "prod" }
            }
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({
                "key": { "kty": "RSA", "n": "modulus", "e": "AQAB" },
                "properties": {
                    "kid": "key-id",
                    "createdOn": "2023-01-01T00:00:00.000Z",
                    "enabled": false,
                    "tags": { "env": "prod" }
                }
            })
        );
    }

    #[test]
    fn tags_always_serialize_as_object() {
        let props = KeyProperties::from_value(&json!({ "name": "k" }));
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({ "tags": {}, "name": "k" })
        );
    }

    #[test]
    fn empty_jwk_serializes_to_empty_object() {
        let jwk = JsonWebKey::from_value(&json!({}));
        assert_eq!(serde_json::to_value(&jwk).unwrap(), json!({}));
    }

    #[test]
    fn full_jwk_roundtrips_every_component() {
        let input = json!({
            "kty": "EC", "key_ops": ["sign"], "kid": "kid", "n": "n", "e": "e",
            "d": "d", "p": "p", "q": "q", "dp": "dp", "dq": "dq", "qi": "qi",
            "k": "k", "x": "x", "y": "y", "crv": "P-256"
        });
        let jwk = JsonWebKey::from_value(&input);
        assert_eq!(serde_json::to_value(&jwk).unwrap(), input);
    }

    #[test]
    fn empty_components_are_omitted() {
        let jwk = JsonWebKey::from_value(&json!({ "kty": "oct", "k": "" }));
        assert_eq!(serde_json::to_value(&jwk).unwrap(), json!({ "kty": "oct" }));
    }

    #[test]
    fn non_boolean_flags_are_dropped() {
        let props = KeyProperties::from_value(&json!({ "enabled": "yes", "exportable": 1 }));
        assert!(props.enabled.is_none());
        assert!(props.exportable.is_none());
    }

    #[test]
    fn missing_properties_serialize_as_null() {
        let key = Key::from_value(&json!({ "key": { "kty": "EC", "x": "abc", "y": "def" } }))
            .unwrap();
        assert!(key.properties.is_none());
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({ "key": { "kty": "EC", "x": "abc", "y": "def" }, "properties": null })
        );
    }

    #[test]
    fn recency_ignores_updated_on() {
        let key = Key::from_value(&json!({
            "properties": {
                "name": "k",
                "updatedOn": "2030-01-01T00:00:00Z"
            }
        }))
        .unwrap();
        assert!(key.recency().is_none());
    }

    #[test]
    fn rejects_null_and_malformed_input() {
        assert!(matches!(Key::from_value(&Value::Null), Err(ModelError::NullRecord { kind: "key" })));
        assert!(matches!(Key::from_json("{\"key\":"), Err(ModelError::Parse(_))));
    }
}
