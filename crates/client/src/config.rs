//! Client configuration.
//!
//! Values are layered, lowest precedence first:
//! 1. built-in defaults (the v1 Accept media type)
//! 2. an optional TOML file
//! 3. `VSM_SERVER_URL` / `VSM_AUTH_TOKEN` environment variables
//! 4. explicit overrides (command-line flags)
//!
//! # Example
//!
//! ```toml
//! [server]
//! url = "https://ci.example.com"
//! auth_token = "..."
//! accept = "application/vnd.go.cd.v1+json"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Versioned media type both VSM endpoints require.
pub const DEFAULT_ACCEPT: &str = "application/vnd.go.cd.v1+json";

pub const SERVER_URL_ENV: &str = "VSM_SERVER_URL";
pub const AUTH_TOKEN_ENV: &str = "VSM_AUTH_TOKEN";

/// Resolved settings used by [`crate::HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `https://ci.example.com`.
    pub server_url: String,
    pub accept: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub auth_token: Option<String>,
}

/// On-disk TOML shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub url: Option<String>,
    pub accept: Option<String>,
    pub auth_token: Option<String>,
}

/// Highest-precedence values, usually taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub server_url: Option<String>,
    pub auth_token: Option<String>,
}

impl ClientConfig {
    pub fn new(server_url: &str) -> Self {
        ClientConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Resolve configuration from all layers, reading the process environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn load_with_env(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match &overrides.config_file {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let server_url = overrides
            .server_url
            .clone()
            .or_else(|| env(SERVER_URL_ENV))
            .or(file.server.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingServerUrl)?;

        let auth_token = overrides
            .auth_token
            .clone()
            .or_else(|| env(AUTH_TOKEN_ENV))
            .or(file.server.auth_token)
            .filter(|token| !token.is_empty());

        let mut config = ClientConfig::new(&server_url);
        if let Some(accept) = file.server.accept {
            config.accept = accept;
        }
        config.auth_token = auth_token;
        Ok(config)
    }
}

/// Read and parse a client config TOML file from `path`.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
