//! # EasyVista connector runner
//!
//! Runs one standardized connector command against the directory.
//!
//! ## Usage
//!
//! The connector source configuration is read from `CONNECTOR_CONFIG`
//! (base64-encoded JSON) and the command from stdin:
//!
//! ```bash
//! export CONNECTOR_CONFIG=$(base64 -w0 config.json)
//! echo '{"type": "std:account:read", "input": {"identity": "1042"}}' \
//!     | cargo run --bin easyvista-connector
//! ```
//!
//! Each produced record is written to stdout as one JSON line. On failure the
//! error response is written to stdout and the process exits with status 1.
//! Logs go to stderr; set `RUST_LOG` to change the level.

use easyvista_connector::ConnectorConfig;
use easyvista_connector::runner::run_command;
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    let status = run_command(
        ConnectorConfig::from_env(),
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .await;
    ExitCode::from(status)
}
