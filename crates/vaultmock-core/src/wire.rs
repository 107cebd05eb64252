//! Response shapes returned by the vault endpoints.
//!
//! Secrets and keys are returned in their stored shape (their `Serialize`
//! impls are the wire format, with ISO-8601 dates). Certificates are
//! reshaped into the key vault's certificate bundle: dates become whole Unix
//! seconds under `attributes`, and the thumbprint is reported as both `kid`
//! and `x5t`.

use serde::Serialize;
use serde_json::Value;

use crate::certificate::{Certificate, CertificateProperties};
use crate::fields::Tags;
use crate::timestamp::Timestamp;

/// Lifecycle attributes of a certificate version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    pub recovery_level: Option<Value>,
    pub recoverable_days: Option<Value>,
}

impl From<&CertificateProperties> for CertificateAttributes {
    fn from(props: &CertificateProperties) -> Self {
        Self {
            enabled: props.enabled,
            nbf: unix_seconds(props.not_before.as_ref()),
            exp: unix_seconds(props.expires_on.as_ref()),
            created: unix_seconds(props.created_on.as_ref()),
            updated: unix_seconds(props.updated_on.as_ref()),
            recovery_level: props.recovery_level.clone(),
            recoverable_days: props.recoverable_days.clone(),
        }
    }
}

/// A single certificate version, as returned by `GET /certificates/{name}/{version}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateBundle {
    pub id: Option<String>,
    /// The x509 thumbprint. The real service reuses this field name.
    pub kid: Option<String>,
    pub sid: Option<String>,
    pub cer: Option<String>,
    pub attributes: CertificateAttributes,
    pub tags: Tags,
    pub x5t: Option<String>,
}

impl From<&Certificate> for CertificateBundle {
    fn from(cert: &Certificate) -> Self {
        let item = CertificateItem::from(cert);
        Self {
            id: item.id,
            kid: item.x5t.clone(),
            sid: cert.secret_id.clone(),
            cer: cert.cer.clone(),
            attributes: item.attributes,
            tags: item.tags,
            x5t: item.x5t,
        }
    }
}

/// One entry of a certificate version listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateItem {
    pub id: Option<String>,
    pub attributes: CertificateAttributes,
    pub tags: Tags,
    pub x5t: Option<String>,
}

impl From<&Certificate> for CertificateItem {
    fn from(cert: &Certificate) -> Self {
        match &cert.properties {
            Some(props) => Self {
                id: props.id.clone(),
                attributes: CertificateAttributes::from(props),
                tags: props.tags.clone(),
                x5t: props.x509_thumbprint.clone(),
            },
            None => Self {
                id: None,
                attributes: CertificateAttributes::default(),
                tags: Tags::new(),
                x5t: None,
            },
        }
    }
}

/// Body of `GET /certificates/{name}/versions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateVersions {
    pub value: Vec<CertificateItem>,
}

impl<'a> FromIterator<&'a Certificate> for CertificateVersions {
    fn from_iter<I: IntoIterator<Item = &'a Certificate>>(iter: I) -> Self {
        Self {
            value: iter.into_iter().map(CertificateItem::from).collect(),
        }
    }
}

fn unix_seconds(ts: Option<&Timestamp>) -> Option<i64> {
    ts.and_then(Timestamp::unix_seconds)
}
