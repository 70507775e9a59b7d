//! Identity governance connector for the EasyVista employee directory.
//!
//! Translates the standardized account and entitlement lifecycle operations
//! of an identity platform into calls against the EasyVista REST API for
//! employees and groups.
//!
//! # Core Components
//!
//! - [`EasyVistaClient`] - Typed requests against the directory endpoints
//! - [`Account`] / [`Entitlement`] - Records shaped to the fixed attribute schema
//! - [`ConnectorOperationHandler`] - Dispatcher for the standardized operations
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use easyvista_connector::{ConnectorConfig, ConnectorOperationHandler, StdCommand};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectorConfig::basic("https://itsm.example.com/api/v1/50004", "svc", "secret")
//!     .with_language("FR");
//! let handler = ConnectorOperationHandler::from_config(&config)?;
//!
//! let response = handler.handle_operation(StdCommand::account_list()).await;
//! for account in &response.outputs {
//!     println!("{}", account["identity"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod operation_handler;
pub mod runner;

pub use client::EasyVistaClient;
pub use config::{AuthMode, ConnectorConfig};
pub use error::{ConnectorError, ConnectorErrorType, ConnectorResult};
pub use model::{Account, Attributes, Entitlement};
pub use operation_handler::{
    AttributeChange, AttributeChangeOp, ConnectorContext, ConnectorOperationHandler,
    ConnectorOperationResponse, ResponseSink, StdCommand,
};
