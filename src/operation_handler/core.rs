//! Core operation handler infrastructure
//!
//! Holds the per-instance connector context and the dispatcher that routes a
//! [`StdCommand`] to its handler.

use super::commands::StdCommand;
use super::handlers;
use super::sink::ResponseSink;
use crate::client::EasyVistaClient;
use crate::config::ConnectorConfig;
use crate::error::{ConnectorErrorType, ConnectorResult};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

/// Everything a handler needs, built once per connector instantiation.
#[derive(Debug, Clone)]
pub struct ConnectorContext {
    pub client: EasyVistaClient,
    /// Suffix of the `GROUP_<language>` field used for entitlement names
    pub language: String,
}

impl ConnectorContext {
    pub fn new(config: &ConnectorConfig) -> ConnectorResult<Self> {
        Ok(Self {
            client: EasyVistaClient::new(config)?,
            language: config.language.clone(),
        })
    }
}

/// Collected result of one standardized operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorOperationResponse {
    pub success: bool,
    /// Records emitted by the operation, in emission order
    pub outputs: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ConnectorErrorType>,
    pub request_id: String,
}

/// Dispatcher for the standardized connector operations.
#[derive(Debug, Clone)]
pub struct ConnectorOperationHandler {
    context: ConnectorContext,
}

impl ConnectorOperationHandler {
    pub fn new(context: ConnectorContext) -> Self {
        Self { context }
    }

    pub fn from_config(config: &ConnectorConfig) -> ConnectorResult<Self> {
        Ok(Self::new(ConnectorContext::new(config)?))
    }

    pub fn context(&self) -> &ConnectorContext {
        &self.context
    }

    /// Run a command, streaming each produced record into `res`.
    pub async fn handle_command<S: ResponseSink>(
        &self,
        command: StdCommand,
        res: &mut S,
    ) -> ConnectorResult<()> {
        let ctx = &self.context;
        match command {
            StdCommand::TestConnection(input) => {
                handlers::connection::test_connection(ctx, input, res).await
            }
            StdCommand::AccountList(input) => handlers::account::account_list(ctx, input, res).await,
            StdCommand::AccountRead(input) => handlers::account::account_read(ctx, input, res).await,
            StdCommand::AccountCreate(input) => {
                handlers::account::account_create(ctx, input, res).await
            }
            StdCommand::AccountUpdate(input) => {
                handlers::account::account_update(ctx, input, res).await
            }
            StdCommand::AccountDisable(input) => {
                handlers::account::account_disable(ctx, input, res).await
            }
            StdCommand::AccountEnable(input) => {
                handlers::account::account_enable(ctx, input, res).await
            }
            StdCommand::EntitlementList(input) => {
                handlers::entitlement::entitlement_list(ctx, input, res).await
            }
            StdCommand::EntitlementRead(input) => {
                handlers::entitlement::entitlement_read(ctx, input, res).await
            }
        }
    }

    /// Run a command and collect its outputs into a response.
    ///
    /// Failures are reported in the response rather than returned. Records
    /// emitted before a failure are dropped.
    pub async fn handle_operation(&self, command: StdCommand) -> ConnectorOperationResponse {
        let request_id = uuid::Uuid::new_v4().to_string();
        let name = command.name();

        info!(
            "Connector processing {} (request: '{}')",
            name, request_id
        );

        let mut outputs: Vec<Value> = Vec::new();
        match self.handle_command(command, &mut outputs).await {
            Ok(()) => {
                debug!(
                    "Connector completed {} with {} output(s) (request: '{}')",
                    name,
                    outputs.len(),
                    request_id
                );
                ConnectorOperationResponse {
                    success: true,
                    outputs,
                    error: None,
                    error_code: None,
                    error_type: None,
                    request_id,
                }
            }
            Err(e) => {
                warn!("Connector {} failed: {} (request: '{}')", name, e, request_id);
                super::errors::create_error_response(e, request_id)
            }
        }
    }
}
