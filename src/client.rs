//! HTTP client for the EasyVista employee directory.
//!
//! [`EasyVistaClient`] wraps a single `reqwest::Client` built once from the
//! connector configuration. Every method issues exactly the requests it
//! documents; non-2xx answers come back as [`ConnectorError::Http`] and are
//! never retried. Ids always travel as a single percent-encoded path segment.

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::{ACCOUNT_FIELDS, Attributes};
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

/// Listing envelope returned by `/employees` and `/groups`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordList {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_record_count: u64,
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Body of `/employees/{id}/groups`: one URL per group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupMembership {
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Answer to an employee creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRecord {
    /// URL of the new employee
    #[serde(rename = "HREF")]
    pub href: String,
}

#[derive(Serialize)]
struct CreateEmployees<'a> {
    employees: [&'a Attributes; 1],
}

// The directory is not consistent about numeric fields and sometimes sends
// counts as strings.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record count {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid record count '{}'", s))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "invalid record count {}",
            other
        ))),
    }
}

/// Client for the directory REST API.
#[derive(Debug, Clone)]
pub struct EasyVistaClient {
    client: Client,
    base_url: Url,
}

impl EasyVistaClient {
    /// Build the client, installing the configured credentials as a default
    /// `Authorization` header.
    pub fn new(config: &ConnectorConfig) -> ConnectorResult<Self> {
        config.validate()?;
        let base_url = Url::parse(config.url.trim()).map_err(|e| {
            ConnectorError::invalid_configuration(format!("invalid url {}: {}", config.url, e))
        })?;

        let mut authorization = HeaderValue::from_str(&config.authorization_header())
            .map_err(|_| {
                ConnectorError::invalid_configuration("credentials contain invalid characters")
            })?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ConnectorError::invalid_configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    /// Append `segments` to the base URL, encoding each one whole so an id
    /// can never add path levels or a query string.
    fn endpoint(&self, segments: &[&str]) -> ConnectorResult<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ConnectorError::invalid_input(format!(
                "'{}' is not a valid directory id",
                bad
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConnectorError::invalid_configuration("url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ConnectorResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> ConnectorResult<Response> {
        let response = request.send().await?.error_for_status()?;
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ConnectorResult<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Connectivity probe against `/license`.
    pub async fn test_connection(&self) -> ConnectorResult<()> {
        self.send(self.request(Method::GET, &["license"])?).await?;
        Ok(())
    }

    /// List employees with the fixed account fields.
    ///
    /// Without a row cap, a one-row request is issued first to learn
    /// `total_record_count`, which then becomes the cap of the real request.
    pub async fn list_employees(&self, max_rows: Option<u64>) -> ConnectorResult<RecordList> {
        let max_rows = match max_rows {
            Some(rows) if rows > 0 => rows,
            _ => self.count_records("employees").await?,
        };
        let fields = ACCOUNT_FIELDS.join(",");

        let request = self
            .request(Method::GET, &["employees"])?
            .query(&[("max_rows", max_rows.to_string()), ("fields", fields)]);
        self.send_json(request).await
    }

    /// List groups, probing the group count first when no cap is given.
    pub async fn list_groups(&self, max_rows: Option<u64>) -> ConnectorResult<RecordList> {
        let max_rows = match max_rows {
            Some(rows) if rows > 0 => rows,
            _ => self.count_records("groups").await?,
        };

        let request = self
            .request(Method::GET, &["groups"])?
            .query(&[("max_rows", max_rows.to_string())]);
        self.send_json(request).await
    }

    async fn count_records(&self, collection: &str) -> ConnectorResult<u64> {
        let mut request = self
            .request(Method::GET, &[collection])?
            .query(&[("max_rows", "1")]);
        if collection == "employees" {
            request = request.query(&[("fields", ACCOUNT_FIELDS.join(","))]);
        }
        let probe: RecordList = self.send_json(request).await?;
        debug!("{} holds {} records", collection, probe.total_record_count);
        Ok(probe.total_record_count)
    }

    pub async fn get_group(&self, id: &str) -> ConnectorResult<Value> {
        self.send_json(self.request(Method::GET, &["groups", id])?)
            .await
    }

    pub async fn get_account(&self, id: &str) -> ConnectorResult<Value> {
        self.send_json(self.request(Method::GET, &["employees", id])?)
            .await
    }

    pub async fn get_group_membership(&self, id: &str) -> ConnectorResult<GroupMembership> {
        self.send_json(self.request(Method::GET, &["employees", id, "groups"])?)
            .await
    }

    /// Assign a profile with the lowercase `profil_id` key the profile
    /// endpoint expects.
    pub async fn set_profil(&self, id: &str, profil: &Value) -> ConnectorResult<()> {
        let request = self
            .request(Method::PUT, &["employees", id])?
            .json(&json!({ "profil_id": profil }));
        self.send(request).await?;
        Ok(())
    }

    /// Partial update of one employee.
    pub async fn update_account(&self, id: &str, data: &Attributes) -> ConnectorResult<()> {
        let request = self
            .request(Method::PUT, &["employees", id])?
            .json(data);
        self.send(request).await?;
        Ok(())
    }

    /// Create one employee, returning the URL of the new record.
    pub async fn create_account(&self, account: &Attributes) -> ConnectorResult<CreatedRecord> {
        let request = self
            .request(Method::POST, &["employees"])?
            .json(&CreateEmployees {
                employees: [account],
            });
        self.send_json(request).await
    }

    pub async fn add_group_member(
        &self,
        group_id: &str,
        employee_id: &str,
    ) -> ConnectorResult<()> {
        let request = self
            .request(Method::POST, &["groups", group_id, "employees", employee_id])?
            .json(&json!({}));
        self.send(request).await?;
        Ok(())
    }

    pub async fn remove_group_member(
        &self,
        group_id: &str,
        employee_id: &str,
    ) -> ConnectorResult<()> {
        let request =
            self.request(Method::DELETE, &["groups", group_id, "employees", employee_id])?;
        self.send(request).await?;
        Ok(())
    }
}
