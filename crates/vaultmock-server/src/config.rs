//! Server configuration for `VaultMock`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! [`ServerConfig::from_lookup`] takes any variable source so tests never
//! touch the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listener address when neither `VAULTMOCK_BIND_ADDR` nor
/// `HTTP_PORT` is set.
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    DEFAULT_PORT,
);

const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Optional external dataset directories.
    pub data: DataSources,
}

/// Directories holding the optional external dataset files.
///
/// Each directory is expected to contain the family's fixed file name
/// (`test-secrets.json`, `test-certificates.json`, `test-keys.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSources {
    pub secrets_dir: Option<PathBuf>,
    pub certificates_dir: Option<PathBuf>,
    pub keys_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `VAULTMOCK_BIND_ADDR` — full bind address (overrides `HTTP_PORT`)
    /// - `HTTP_PORT` — port to bind on, listening on `0.0.0.0` (default: `127.0.0.1:3000`)
    /// - `VAULTMOCK_LOG_LEVEL` — log filter when `RUST_LOG` is unset (default: `info`)
    /// - `SECRETS_DIR` — directory containing `test-secrets.json`
    /// - `CERTIFICATES_DIR` — directory containing `test-certificates.json`
    /// - `KEYS_DIR` — directory containing `test-keys.json`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: VAULTMOCK_BIND_ADDR > HTTP_PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = lookup("VAULTMOCK_BIND_ADDR") {
            addr.parse().unwrap_or(DEFAULT_BIND_ADDR)
        } else if let Some(port_str) = lookup("HTTP_PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            DEFAULT_BIND_ADDR
        };

        let log_level = lookup("VAULTMOCK_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let dir = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            bind_addr,
            log_level,
            data: DataSources {
                secrets_dir: dir("SECRETS_DIR"),
                certificates_dir: dir("CERTIFICATES_DIR"),
                keys_dir: dir("KEYS_DIR"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.data, DataSources::default());
    }

    #[test]
    fn http_port_binds_all_interfaces() {
        let cfg = config(&[("HTTP_PORT", "8080")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let cfg = config(&[("HTTP_PORT", "8080"), ("VAULTMOCK_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn invalid_values_fall_back() {
        assert_eq!(
            config(&[("VAULTMOCK_BIND_ADDR", "nope")]).bind_addr,
            DEFAULT_BIND_ADDR
        );
        assert_eq!(
            config(&[("HTTP_PORT", "99999")]).bind_addr,
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
    }

    #[test]
    fn reads_external_directories() {
        let cfg = config(&[
            ("SECRETS_DIR", "/data/secrets"),
            ("CERTIFICATES_DIR", ""),
            ("KEYS_DIR", "/data/keys"),
        ]);
        assert_eq!(cfg.data.secrets_dir, Some(PathBuf::from("/data/secrets")));
        assert_eq!(cfg.data.certificates_dir, None);
        assert_eq!(cfg.data.keys_dir, Some(PathBuf::from("/data/keys")));
    }
}
