//! Connectivity probe.

use crate::error::ConnectorResult;
use crate::operation_handler::commands::StdTestConnectionInput;
use crate::operation_handler::core::ConnectorContext;
use crate::operation_handler::sink::ResponseSink;
use log::info;
use serde_json::json;

/// Probe the directory; emits one empty record on success.
pub async fn test_connection<S: ResponseSink>(
    ctx: &ConnectorContext,
    _input: StdTestConnectionInput,
    res: &mut S,
) -> ConnectorResult<()> {
    info!("Running test connection");
    ctx.client.test_connection().await?;
    res.send(&json!({}))
}
