//! Error types for connector operations.
//!
//! Every failure raised while talking to the directory or reshaping its
//! records ends up as a [`ConnectorError`]. The standardized operation
//! surface only distinguishes two categories, exposed through
//! [`ConnectorError::error_type`].

use serde::{Deserialize, Serialize};

/// Main error type for connector operations.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Network failure or non-2xx answer from the directory
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Requested account or entitlement does not exist
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    /// Raw directory record does not have the expected shape
    #[error("Malformed directory record: missing or invalid '{field}'")]
    MalformedRecord { field: String },

    /// Contract date that does not match the expected format
    #[error("Invalid date '{value}', expected format {format}")]
    InvalidDate { value: String, format: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure writing output records
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connector source configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Standardized operation input is missing something required
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Failure category reported on the standardized operation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectorErrorType {
    Generic,
    NotFound,
}

impl ConnectorError {
    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            format: format.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Category surfaced to the caller of the standardized operation.
    pub fn error_type(&self) -> ConnectorErrorType {
        match self {
            Self::NotFound { .. } => ConnectorErrorType::NotFound,
            _ => ConnectorErrorType::Generic,
        }
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "HTTP_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::Json(_) => "JSON_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
