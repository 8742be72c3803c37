//! Client configuration: root URL, credentials, mutual TLS and proxy.
//!
//! # Design
//! A `Config` is owned by one `DefaultOffersClient`; there is no process-wide
//! store. Only the root URL and the client key/secret are checked, and only
//! when the client is constructed. Missing mutual-TLS or proxy sections are
//! tolerated here and surface, if at all, when a call is made.
//!
//! `Config::from_json_file` reads the JSON layout used by the vendor's sample
//! `config.json`, where the mutual-TLS entries are paths to PEM files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::util::is_blank;

/// Full client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Host (optionally with scheme and base path) that request paths are
    /// appended to.
    pub root_url: String,
    pub authentication: Authentication,
    pub mutual_auth: Option<MutualAuth>,
    pub http_proxy: Option<HttpProxy>,
    /// Whole-request deadline. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// OAuth client credentials and the bearer token obtained with them.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    #[serde(default)]
    pub client_key: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub bearer_token: String,
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("client_key", &self.client_key)
            .field("client_secret", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// PEM-encoded client key and certificate presented during the TLS handshake.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MutualAuth {
    pub private_key: Vec<u8>,
    pub public_cert: Vec<u8>,
}

impl fmt::Debug for MutualAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutualAuth")
            .field("private_key", &"<redacted>")
            .field("public_cert", &format_args!("{} bytes", self.public_cert.len()))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxy {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: String,
}

/// On-disk layout: `mutualAuth` holds file paths instead of PEM bytes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    root_url: String,
    #[serde(default)]
    authentication: Authentication,
    mutual_auth: Option<MutualAuthFile>,
    http_proxy: Option<HttpProxy>,
    timeout_ms: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutualAuthFile {
    private_key: PathBuf,
    public_cert: PathBuf,
}

impl Config {
    pub fn new(root_url: &str, client_key: &str, client_secret: &str) -> Self {
        Self {
            root_url: root_url.to_string(),
            authentication: Authentication {
                client_key: client_key.to_string(),
                client_secret: client_secret.to_string(),
                bearer_token: String::new(),
            },
            ..Default::default()
        }
    }

    pub fn with_mutual_auth(mut self, private_key: Vec<u8>, public_cert: Vec<u8>) -> Self {
        self.mutual_auth = Some(MutualAuth {
            private_key,
            public_cert,
        });
        self
    }

    pub fn with_proxy(mut self, host: &str, port: &str) -> Self {
        self.http_proxy = Some(HttpProxy {
            is_enabled: true,
            host: host.to_string(),
            port: port.to_string(),
        });
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the fields that must be present before any call is made.
    /// Returns one message per problem; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.root_url) {
            errors.push("root URL is empty in configuration".to_string());
        }
        if is_blank(&self.authentication.client_key) {
            errors.push("client Key is empty in configuration".to_string());
        }
        if is_blank(&self.authentication.client_secret) {
            errors.push("client Secret is empty in configuration".to_string());
        }
        errors
    }

    /// Load a JSON config file, reading the PEM files it points at.
    /// Relative PEM paths resolve against the config file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| file_error(path, &e))?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|e| file_error(path, &e))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let mutual_auth = match file.mutual_auth {
            Some(paths) => Some(MutualAuth {
                private_key: read_pem(base, &paths.private_key)?,
                public_cert: read_pem(base, &paths.public_cert)?,
            }),
            None => None,
        };

        Ok(Self {
            root_url: file.root_url,
            authentication: file.authentication,
            mutual_auth,
            http_proxy: file.http_proxy,
            timeout: file.timeout_ms.map(Duration::from_millis),
        })
    }
}

fn read_pem(base: &Path, path: &Path) -> Result<Vec<u8>> {
    let full = base.join(path);
    std::fs::read(&full).map_err(|e| file_error(&full, &e))
}

fn file_error(path: &Path, err: &dyn fmt::Display) -> Error {
    Error::validation(vec![format!("cannot load {}: {err}", path.display())])
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(s) => s,
        Port::Number(n) => n.to_string(),
    })
}
