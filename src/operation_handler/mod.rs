//! Standardized connector operation surface.
//!
//! This module maps the identity platform's standardized account and
//! entitlement operations onto directory calls.
//!
//! # Key Types
//!
//! - [`ConnectorOperationHandler`] - Dispatches a [`StdCommand`] to its handler
//! - [`ConnectorContext`] - Client and settings shared by all handlers
//! - [`ResponseSink`] - Receives produced records one at a time
//! - [`DirectoryStep`] - One planned remote mutation
//!
//! # Examples
//!
//! ```rust,no_run
//! use easyvista_connector::ConnectorConfig;
//! use easyvista_connector::operation_handler::{ConnectorOperationHandler, StdCommand};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectorConfig::token("https://itsm.example.com/api/v1/50004", "token");
//! let handler = ConnectorOperationHandler::from_config(&config)?;
//!
//! let response = handler.handle_operation(StdCommand::account_read("1042")).await;
//! # Ok(())
//! # }
//! ```

mod builders;
mod commands;
mod core;
mod errors;
pub mod handlers;
mod sink;
mod steps;

pub use commands::{
    AttributeChange, AttributeChangeOp, StdAccountCreateInput, StdAccountDisableInput,
    StdAccountEnableInput, StdAccountListInput, StdAccountReadInput, StdAccountUpdateInput,
    StdCommand, StdEntitlementListInput, StdEntitlementReadInput, StdTestConnectionInput,
};
pub use self::core::{ConnectorContext, ConnectorOperationHandler, ConnectorOperationResponse};
pub use errors::create_error_response;
pub use sink::{JsonLinesSink, ResponseSink};
pub use steps::{DirectoryStep, execute_steps, group_ids, plan_changes, plan_group_additions};
