//! Connector source configuration.
//!
//! The configuration is handed to the connector as a JSON document, either
//! directly or base64-encoded in the `CONNECTOR_CONFIG` environment variable.
//! It is read once per connector instantiation and never mutated afterwards.

use crate::error::{ConnectorError, ConnectorResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the base64-encoded configuration.
pub const CONFIG_ENV_VAR: &str = "CONNECTOR_CONFIG";

/// Language used to pick the localized group name when none is configured.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// How the connector authenticates against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    /// HTTP Basic with `basic.username` / `basic.password`
    #[serde(rename = "auth.basic")]
    Basic,
    /// Bearer token from `token.value`
    #[serde(rename = "auth.token")]
    Token,
}

/// Connector source configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL of the directory REST API, e.g. `https://host/api/v1/50004`
    pub url: String,

    pub auth: AuthMode,

    #[serde(rename = "basic.username", default, skip_serializing_if = "Option::is_none")]
    pub basic_username: Option<String>,

    #[serde(rename = "basic.password", default, skip_serializing_if = "Option::is_none")]
    pub basic_password: Option<String>,

    #[serde(rename = "token.value", default, skip_serializing_if = "Option::is_none")]
    pub token_value: Option<String>,

    /// Suffix of the `GROUP_<language>` attribute used as entitlement name
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("ConnectorConfig")
            .field("url", &self.url)
            .field("auth", &self.auth)
            .field("basic_username", &self.basic_username)
            .field("basic_password", &redact(&self.basic_password))
            .field("token_value", &redact(&self.token_value))
            .field("language", &self.language)
            .finish()
    }
}

impl ConnectorConfig {
    /// Configuration using HTTP Basic authentication.
    pub fn basic(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            auth: AuthMode::Basic,
            basic_username: Some(username.into()),
            basic_password: Some(password.into()),
            token_value: None,
            language: default_language(),
        }
    }

    /// Configuration using a bearer token.
    pub fn token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: AuthMode::Token,
            basic_username: None,
            basic_password: None,
            token_value: Some(token.into()),
            language: default_language(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> ConnectorResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            ConnectorError::invalid_configuration(format!("cannot parse configuration: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration from [`CONFIG_ENV_VAR`].
    pub fn from_env() -> ConnectorResult<Self> {
        Self::from_env_value(std::env::var(CONFIG_ENV_VAR).ok().as_deref())
    }

    /// Decode the value of [`CONFIG_ENV_VAR`]; `None` means the variable is
    /// unset.
    pub fn from_env_value(value: Option<&str>) -> ConnectorResult<Self> {
        let encoded = value.ok_or_else(|| {
            ConnectorError::invalid_configuration(format!("{} is not set", CONFIG_ENV_VAR))
        })?;
        Self::from_base64(encoded)
    }

    /// Decode a base64-encoded JSON configuration document.
    pub fn from_base64(encoded: &str) -> ConnectorResult<Self> {
        let bytes = STANDARD.decode(encoded.trim()).map_err(|e| {
            ConnectorError::invalid_configuration(format!("configuration is not base64: {}", e))
        })?;
        let json = String::from_utf8(bytes).map_err(|_| {
            ConnectorError::invalid_configuration("configuration is not valid UTF-8")
        })?;
        Self::from_json(&json)
    }

    /// Check that the selected auth mode has its credentials.
    pub fn validate(&self) -> ConnectorResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConnectorError::invalid_configuration("url is required"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConnectorError::invalid_configuration(format!(
                "url must use http or https: {}",
                self.url
            )));
        }

        match self.auth {
            AuthMode::Basic => {
                if is_blank(&self.basic_username) {
                    return Err(ConnectorError::invalid_configuration(
                        "basic.username is required for basic authentication",
                    ));
                }
                if self.basic_password.is_none() {
                    return Err(ConnectorError::invalid_configuration(
                        "basic.password is required for basic authentication",
                    ));
                }
            }
            AuthMode::Token => {
                if is_blank(&self.token_value) {
                    return Err(ConnectorError::invalid_configuration(
                        "token.value is required for token authentication",
                    ));
                }
            }
        }

        if self.language.trim().is_empty() {
            return Err(ConnectorError::invalid_configuration(
                "language cannot be empty",
            ));
        }
        Ok(())
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization_header(&self) -> String {
        match self.auth {
            AuthMode::Basic => {
                let credentials = format!(
                    "{}:{}",
                    self.basic_username.as_deref().unwrap_or_default(),
                    self.basic_password.as_deref().unwrap_or_default()
                );
                format!("Basic {}", STANDARD.encode(credentials))
            }
            AuthMode::Token => {
                format!("Bearer {}", self.token_value.as_deref().unwrap_or_default())
            }
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or_default().is_empty()
}
