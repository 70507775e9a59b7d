//! Entitlement shaping from raw directory group records.

use super::{Attributes, id_string};
use crate::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag carried by every entitlement.
pub const ENTITLEMENT_TYPE: &str = "group";

/// A directory group as seen by the identity platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Group id
    pub identity: String,
    /// Localized group name
    pub uuid: String,
    pub attributes: Attributes,
    #[serde(rename = "type")]
    pub entitlement_type: String,
}

impl Entitlement {
    /// Shape a raw group record, naming it from `GROUP_<language>`.
    pub fn from_record(record: &Value, language: &str) -> ConnectorResult<Self> {
        let record = record
            .as_object()
            .ok_or_else(|| ConnectorError::malformed("group"))?;
        let name_field = format!("GROUP_{}", language);
        let field = |name: &str| record.get(name).cloned().unwrap_or(Value::Null);

        let mut attributes = Attributes::new();
        attributes.insert("HREF".to_string(), field("HREF"));
        attributes.insert("ID".to_string(), field("GROUP_ID"));
        attributes.insert("NAME".to_string(), field(&name_field));

        let identity = attributes
            .get("ID")
            .and_then(id_string)
            .ok_or_else(|| ConnectorError::malformed("GROUP_ID"))?;
        let uuid = attributes
            .get("NAME")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            identity,
            uuid,
            attributes,
            entitlement_type: ENTITLEMENT_TYPE.to_string(),
        })
    }
}
