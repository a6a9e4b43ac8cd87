//
//  imgur-album-upload
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads the credentials used to talk to Imgur. Loading happens once at
//! startup and produces an immutable [`Credentials`] value that is handed to
//! the API client; nothing reads the environment after that.
//!
//! ## Sources
//!
//! Values are read from a `secrets.env` file in `KEY=VALUE` form, then
//! overridden by process environment variables of the same name:
//!
//! | Key | Required | Purpose |
//! |-----|----------|---------|
//! | `CLIENT_ID` | yes | Application client id |
//! | `ACCESS_TOKEN` | no | OAuth bearer token (uploads to the user's account) |
//! | `MASHAPE_KEY` / `PROXY_KEY` | no | Marketplace proxy key |
//!
//! ## Example secrets file
//!
//! ```text
//! CLIENT_ID=0123456789abcde
//! ACCESS_TOKEN=4c1d...
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default location of the secrets file, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.env";

pub const CLIENT_ID_KEY: &str = "CLIENT_ID";
pub const ACCESS_TOKEN_KEY: &str = "ACCESS_TOKEN";
pub const PROXY_KEY_KEYS: [&str; 2] = ["MASHAPE_KEY", "PROXY_KEY"];

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CLIENT_ID is not set; add it to the secrets file or the environment")]
    MissingClientId,

    #[error("Failed to read secrets file {}: {source}", .path.display())]
    SecretsFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Credentials for the Imgur API.
///
/// Determines which authentication headers the client sends and whether
/// requests go through the marketplace proxy.
///
/// # Example
///
/// ```rust
/// use imgur_album_upload::config::Credentials;
///
/// let creds = Credentials::new("my-client-id").with_access_token("token");
/// assert_eq!(creds.client_id, "my-client-id");
/// assert!(!creds.is_proxied());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub access_token: Option<String>,
    pub proxy_key: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_token: None,
            proxy_key: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_proxy_key(mut self, key: impl Into<String>) -> Self {
        self.proxy_key = Some(key.into());
        self
    }

    /// Returns `true` when requests must be routed through the proxy.
    pub fn is_proxied(&self) -> bool {
        self.proxy_key.is_some()
    }

    /// Builds credentials from a key lookup function.
    ///
    /// Blank values count as unset. The proxy key is looked up under each
    /// name in [`PROXY_KEY_KEYS`], first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingClientId`] if no client id is found.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let client_id = get(CLIENT_ID_KEY).ok_or(ConfigError::MissingClientId)?;

        Ok(Self {
            client_id,
            access_token: get(ACCESS_TOKEN_KEY),
            proxy_key: PROXY_KEY_KEYS.iter().find_map(|key| get(*key)),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("access_token", &redact(&self.access_token))
            .field("proxy_key", &redact(&self.proxy_key))
            .finish()
    }
}

/// Loads credentials from `secrets_path` overlaid with the process environment.
///
/// A missing secrets file is not an error; the environment alone may
/// provide everything.
pub fn load_credentials(secrets_path: &Path) -> Result<Credentials, ConfigError> {
    load_credentials_with(secrets_path, |key| std::env::var(key).ok())
}

/// Like [`load_credentials`] but with an explicit environment lookup.
pub fn load_credentials_with<E>(secrets_path: &Path, env: E) -> Result<Credentials, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let file_values = read_secrets_file(secrets_path)?;

    Credentials::from_lookup(|key| {
        env(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file_values.get(key).cloned())
    })
}

fn read_secrets_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let to_error = |source| ConfigError::SecretsFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!("No secrets file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => return Err(to_error(e)),
    };

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(to_error)?;
        values.insert(key, value);
    }

    tracing::debug!("Read {} entries from {}", values.len(), path.display());
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn secrets_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_client_id_only() {
        let creds = Credentials::from_lookup(lookup(&[("CLIENT_ID", "abc")])).unwrap();
        assert_eq!(creds, Credentials::new("abc"));
    }

    #[test]
    fn test_missing_client_id() {
        let err = Credentials::from_lookup(lookup(&[("ACCESS_TOKEN", "tok")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingClientId));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let err = Credentials::from_lookup(lookup(&[("CLIENT_ID", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingClientId));

        let creds =
            Credentials::from_lookup(lookup(&[("CLIENT_ID", "abc"), ("ACCESS_TOKEN", "")]))
                .unwrap();
        assert!(creds.access_token.is_none());
    }

    #[test]
    fn test_proxy_key_aliases() {
        let creds =
            Credentials::from_lookup(lookup(&[("CLIENT_ID", "abc"), ("PROXY_KEY", "pk")]))
                .unwrap();
        assert_eq!(creds.proxy_key.as_deref(), Some("pk"));

        let creds = Credentials::from_lookup(lookup(&[
            ("CLIENT_ID", "abc"),
            ("MASHAPE_KEY", "mk"),
            ("PROXY_KEY", "pk"),
        ]))
        .unwrap();
        assert_eq!(creds.proxy_key.as_deref(), Some("mk"));
    }

    #[test]
    fn test_file_values() {
        let file = secrets_file("CLIENT_ID=from-file\nACCESS_TOKEN=file-token\n");
        let creds = load_credentials_with(file.path(), |_| None).unwrap();
        assert_eq!(creds.client_id, "from-file");
        assert_eq!(creds.access_token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = secrets_file("CLIENT_ID=from-file\nMASHAPE_KEY=file-key\n");
        let creds = load_credentials_with(file.path(), lookup(&[("CLIENT_ID", "from-env")]))
            .unwrap();
        assert_eq!(creds.client_id, "from-env");
        assert_eq!(creds.proxy_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_missing_file_uses_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.env");
        let creds = load_credentials_with(&path, lookup(&[("CLIENT_ID", "env-only")])).unwrap();
        assert_eq!(creds.client_id, "env-only");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("abc")
            .with_access_token("secret-token")
            .with_proxy_key("secret-key");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("abc"));
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-key"));
    }
}
