//! Shared fixtures for the connector integration tests.
//!
//! Every test drives the real client against a `wiremock` server standing in
//! for the directory.

#![allow(dead_code)]

use easyvista_connector::{ConnectorConfig, ConnectorOperationHandler};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub async fn setup() -> (MockServer, ConnectorOperationHandler) {
    let server = MockServer::start().await;
    let config = ConnectorConfig::token(server.uri(), TOKEN).with_language("FR");
    let handler = ConnectorOperationHandler::from_config(&config).unwrap();
    (server, handler)
}

/// Raw employee record as returned by `/employees/{id}`.
pub fn raw_employee(id: &str, begin: &str, end: &str) -> Value {
    json!({
        "EMPLOYEE_ID": id,
        "LAST_NAME": format!("Employee {}", id),
        "HREF": format!("https://itsm.example.com/api/v1/50004/employees/{}", id),
        "E_MAIL": format!("{}@example.com", id.to_lowercase()),
        "CELLULAR_NUMBER": "",
        "PHONE_NUMBER": "+33100000000",
        "IDENTIFICATION": id,
        "LOGIN": id.to_lowercase(),
        "MANAGER_ID": "",
        "BEGIN_OF_CONTRACT": begin,
        "END_OF_CONTRACT": end,
        "PROFIL_ID": 3,
        "LOCATION_ID": 12,
        "LOCATION": {
            "LOCATION_CODE": "PAR",
            "LOCATION_FR": "Paris",
            "LOCATION_PATH": "France/Paris",
            "CITY": "Paris"
        },
        "DEPARTMENT_ID": 5,
        "DEPARTMENT": {
            "DEPARTMENT_CODE": "IT",
            "DEPARTMENT_FR": "Informatique",
            "DEPARTMENT_PATH": "Corp/IT",
            "DEPARTMENT_LABEL": "IT"
        }
    })
}

pub fn raw_group(id: u64, name_fr: &str) -> Value {
    json!({
        "HREF": format!("https://itsm.example.com/api/v1/50004/groups/{}", id),
        "GROUP_ID": id,
        "GROUP_EN": format!("{} (en)", name_fr),
        "GROUP_FR": name_fr
    })
}

pub fn group_url(id: &str) -> String {
    format!("https://itsm.example.com/api/v1/50004/groups/{}", id)
}

/// Serve `GET /employees/{id}`.
pub async fn mount_employee(server: &MockServer, id: &str, record: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/employees/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(record))
        .mount(server)
        .await;
}

/// Serve `GET /employees/{id}/groups` with one URL per group id.
pub async fn mount_membership(server: &MockServer, id: &str, groups: &[&str]) {
    let urls: Vec<String> = groups.iter().map(|g| group_url(g)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/employees/{}/groups", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groups": urls })))
        .mount(server)
        .await;
}

/// `METHOD /path` of every request the server saw, in arrival order.
pub async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(describe)
        .collect()
}

pub fn describe(request: &Request) -> String {
    format!("{} {}", request.method.as_str(), request.url.path())
}
