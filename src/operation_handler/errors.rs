//! Error response creation for the operation handler.

use super::core::ConnectorOperationResponse;
use crate::error::ConnectorError;

/// Create an error response from a ConnectorError.
pub fn create_error_response(
    error: ConnectorError,
    request_id: String,
) -> ConnectorOperationResponse {
    ConnectorOperationResponse {
        success: false,
        outputs: Vec::new(),
        error: Some(error.to_string()),
        error_code: Some(error.code().to_string()),
        error_type: Some(error.error_type()),
        request_id,
    }
}
