//! Standardized operation handlers
//!
//! Each handler takes the connector context, its typed input and a sink that
//! receives the produced records.

pub mod account;
pub mod connection;
pub mod entitlement;

use crate::error::{ConnectorError, ConnectorResult};

/// Reject blank identities before they reach a resource URL.
pub(crate) fn require_identity<'a>(
    identity: &'a str,
    operation: &str,
) -> ConnectorResult<&'a str> {
    if identity.trim().is_empty() {
        return Err(ConnectorError::invalid_input(format!(
            "missing identity for {}",
            operation
        )));
    }
    Ok(identity)
}
