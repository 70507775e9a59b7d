//! One-shot command execution over byte streams.
//!
//! [`run_command`] reads a single [`StdCommand`] document from its input and
//! writes every produced record to its output as one JSON line. On failure
//! the error response is written to the same output instead and the exit
//! status is [`EXIT_FAILURE`].

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, ConnectorResult};
use crate::operation_handler::{
    ConnectorOperationHandler, ConnectorOperationResponse, JsonLinesSink, StdCommand,
    create_error_response,
};
use log::{error, info};
use std::io::{Read, Write};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Run the command read from `input` and return the process exit status.
pub async fn run_command<R: Read, W: Write>(
    config: ConnectorResult<ConnectorConfig>,
    mut input: R,
    mut output: W,
) -> u8 {
    match execute(config, &mut input, &mut output).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            let response = create_error_response(e, uuid::Uuid::new_v4().to_string());
            if let Err(e) = write_response(&mut output, &response) {
                error!("Cannot write error response: {}", e);
            }
            EXIT_FAILURE
        }
    }
}

async fn execute<R: Read, W: Write>(
    config: ConnectorResult<ConnectorConfig>,
    input: &mut R,
    output: &mut W,
) -> ConnectorResult<()> {
    let config = config?;
    let handler = ConnectorOperationHandler::from_config(&config)?;

    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    let command: StdCommand = serde_json::from_str(&raw)
        .map_err(|e| ConnectorError::invalid_input(format!("cannot parse command: {}", e)))?;
    info!("Running {} with {:?}", command.name(), config);

    let mut sink = JsonLinesSink::new(output);
    handler.handle_command(command, &mut sink).await
}

fn write_response<W: Write>(
    output: &mut W,
    response: &ConnectorOperationResponse,
) -> ConnectorResult<()> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
