//! Command runner tests: config, stdin command and JSON-lines output.

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::*;
use easyvista_connector::ConnectorConfig;
use easyvista_connector::runner::{EXIT_FAILURE, EXIT_SUCCESS, run_command};
use serde_json::{Value, json};
use wiremock::MockServer;

fn encoded_config(server: &MockServer) -> String {
    let json = json!({
        "url": server.uri(),
        "auth": "auth.token",
        "token.value": TOKEN,
        "language": "FR"
    });
    STANDARD.encode(json.to_string())
}

fn output_lines(output: Vec<u8>) -> Vec<Value> {
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_runs_command_from_input() {
    let server = MockServer::start().await;
    mount_employee(&server, "1042", raw_employee("1042", "", "")).await;
    mount_membership(&server, "1042", &["10"]).await;

    let config = ConnectorConfig::from_env_value(Some(&encoded_config(&server)));
    let command = r#"{"type": "std:account:read", "input": {"identity": "1042"}}"#;
    let mut output = Vec::new();

    let status = run_command(config, command.as_bytes(), &mut output).await;
    assert_eq!(status, EXIT_SUCCESS);

    let lines = output_lines(output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["identity"], json!("1042"));
    assert_eq!(lines[0]["attributes"]["GROUPS"], json!(["10"]));
}

#[tokio::test]
async fn test_unparseable_command_writes_error_response() {
    let server = MockServer::start().await;

    let config = ConnectorConfig::from_env_value(Some(&encoded_config(&server)));
    let mut output = Vec::new();

    let status = run_command(config, "not a command".as_bytes(), &mut output).await;
    assert_eq!(status, EXIT_FAILURE);

    let lines = output_lines(output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["success"], json!(false));
    assert_eq!(lines[0]["error_code"], json!("INVALID_INPUT"));
    assert!(request_log(&server).await.is_empty());
}

#[tokio::test]
async fn test_missing_config_writes_error_response() {
    let command = r#"{"type": "std:test-connection", "input": {}}"#;
    let mut output = Vec::new();

    let status = run_command(
        ConnectorConfig::from_env_value(None),
        command.as_bytes(),
        &mut output,
    )
    .await;
    assert_eq!(status, EXIT_FAILURE);

    let lines = output_lines(output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["error_code"], json!("INVALID_CONFIGURATION"));
    assert!(
        lines[0]["error"]
            .as_str()
            .unwrap()
            .contains("CONNECTOR_CONFIG")
    );
}
