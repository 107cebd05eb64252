//! Certificate records.
//!
//! Unlike secrets and keys, certificates are never served in their stored
//! shape; see [`crate::wire`] for the bundle and version-list formats.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::fields::{self, Tags};
use crate::resolver::{self, VersionedRecord};
use crate::timestamp::Timestamp;

/// Identity, versioning, and metadata of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProperties {
    pub vault_url: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub not_before: Option<Timestamp>,
    pub expires_on: Option<Timestamp>,
    pub created_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
    pub recovery_level: Option<Value>,
    pub id: Option<String>,
    pub tags: Tags,
    /// Base64url SHA-1 thumbprint of the certificate.
    pub x509_thumbprint: Option<String>,
    pub recoverable_days: Option<Value>,
}

impl CertificateProperties {
    /// Build properties from a JSON value. A non-object yields all defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let map = fields::object_or_empty(value);
        Self {
            vault_url: fields::string(&map, "vaultUrl"),
            version: fields::string(&map, "version"),
            name: fields::string(&map, "name"),
            enabled: fields::boolean(&map, "enabled"),
            not_before: fields::timestamp(&map, "notBefore"),
            expires_on: fields::timestamp(&map, "expiresOn"),
            created_on: fields::timestamp(&map, "createdOn"),
            updated_on: fields::timestamp(&map, "updatedOn"),
            recovery_level: fields::passthrough(&map, "recoveryLevel"),
            id: fields::string(&map, "id"),
            tags: fields::tags(&map, "tags"),
            x509_thumbprint: fields::string(&map, "x509Thumbprint"),
            recoverable_days: fields::passthrough(&map, "recoverableDays"),
        }
    }
}

/// A stored certificate version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// DER bytes, base64-encoded.
    pub cer: Option<String>,
    pub key_id: Option<String>,
    pub secret_id: Option<String>,
    pub properties: Option<CertificateProperties>,
}

impl Certificate {
    /// Build a certificate from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NullRecord`] if `value` is `null`.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        if value.is_null() {
            return Err(ModelError::NullRecord {
                kind: "certificate",
            });
        }
        let map = fields::object_or_empty(value);
        Ok(Self {
            cer: fields::string(&map, "cer"),
            key_id: fields::string(&map, "keyId"),
            secret_id: fields::string(&map, "secretId"),
            properties: fields::nested(&map, "properties").map(CertificateProperties::from_value),
        })
    }

    /// Parse a certificate from JSON text.
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

impl VersionedRecord for Certificate {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_input() -> Value {
        json!({
            "cer": "MIIDXTCCAkWgAwIBAgIJAO",
            "keyId": "https://vault/keys/my-cert/v1",
            "secretId": "https://vault/secrets/my-cert/v1",
            "properties": {
                "vaultUrl": "https://example.com",
                "version": "v1",
                "name": "cert1",
                "enabled": true,
                "notBefore": "2023-01-01T00:00:00.000Z",
                "expiresOn": "2024-01-01T00:00:00.000Z",
                "createdOn": "2023-01-01T00:00:00.000Z",
                "updatedOn": "2023-06-01T00:00:00.000Z",
                "recoveryLevel": "Recoverable",
                "id": "123",
                "tags": { "env": "prod" },
                "x509Thumbprint": "abc123",
                "recoverableDays": 90
            }
        })
    }

    #[test]
    fn builds_from_full_object() {
        let cert = Certificate::from_value(&full_input()).unwrap();
        assert_eq!(cert.cer.as_deref(), Some("MIIDXTCCAkWgAwIBAgIJAO"));
        assert_eq!(cert.secret_id.as_deref(), Some("https://vault/secrets/my-cert/v1"));
        let props = cert.properties.as_ref().unwrap();
        assert_eq!(props.vault_url.as_deref(), Some("https://example.com"));
        assert_eq!(props.x509_thumbprint.as_deref(), Some("abc123"));
        assert_eq!(
            props.expires_on,
            Some(Timestamp::parse("2024-01-01T00:00:00.000Z"))
        );
        assert_eq!(cert.recency(), Timestamp::parse("2023-06-01T00:00:00Z").instant());
    }

    #[test]
    fn json_text_matches_object_form() {
        let text = full_input().to_string();
        assert_eq!(
            Certificate::from_json(&text).unwrap(),
            Certificate::from_value(&full_input()).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_json_text() {
        let err = Certificate::from_json(r#"{"cer": "base64cer", "keyId": "key-id-123","#)
            .unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let cert = Certificate::from_value(&json!({ "keyId": "key-id-123" })).unwrap();
        assert_eq!(cert.key_id.as_deref(), Some("key-id-123"));
        assert!(cert.cer.is_none());
        assert!(cert.secret_id.is_none());
        assert!(cert.properties.is_none());
    }

    #[test]
    fn non_object_properties_become_defaults() {
        let cert = Certificate::from_value(&json!({
            "cer": "base64cer",
            "properties": 12345
        }))
        .unwrap();
        assert_eq!(cert.properties, Some(CertificateProperties::default()));
        assert!(cert.name().is_none());
    }

    #[test]
    fn mistyped_fields_do_not_fail() {
        let props = CertificateProperties::from_value(&json!({
            "vaultUrl": 12345,
            "version": ["v1", "v2"],
            "name": { "first": "cert" },
            "enabled": "yes",
            "notBefore": 1_672_531_200_000_i64,
            "tags": "not-an-object",
            "recoverableDays": "thirty"
        }));
        assert!(props.vault_url.is_none());
        assert!(props.version.is_none());
        assert!(props.name.is_none());
        assert!(props.enabled.is_none());
        assert!(props.tags.is_empty());
        assert_eq!(props.recoverable_days, Some(json!("thirty")));
        assert_eq!(
            props.not_before.as_ref().and_then(Timestamp::to_iso_string).as_deref(),
            Some("2023-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn serializes_dates_as_iso_and_absent_as_null() {
        let props = CertificateProperties::from_value(&json!({
            "name": "cert3",
            "notBefore": "2020-01-01T00:00:00Z"
        }));
        let out = serde_json::to_value(&props).unwrap();
        assert_eq!(out["notBefore"], json!("2020-01-01T00:00:00.000Z"));
        assert_eq!(out["expiresOn"], Value::Null);
        assert_eq!(out["vaultUrl"], Value::Null);
        assert_eq!(out["x509Thumbprint"], Value::Null);
        assert_eq!(out["tags"], json!({}));
    }

    #[test]
    fn serializes_record_with_camel_case_ids() {
        let cert = Certificate::from_value(&json!({ "secretId": "s" })).unwrap();
        let out = serde_json::to_value(&cert).unwrap();
        assert_eq!(
            out,
            json!({ "cer": null, "keyId": null, "secretId": "s", "properties": null })
        );
    }
}
