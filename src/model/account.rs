//! Account shaping from raw directory employee records.

use super::{Attributes, id_string};
use crate::dates::ContractDate;
use crate::error::{ConnectorError, ConnectorResult};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields requested from the directory when listing employees.
///
/// Dotted paths address the `LOCATION` and `DEPARTMENT` sub-objects; the
/// account attribute name is the last path segment.
pub const ACCOUNT_FIELDS: [&str; 22] = [
    "EMPLOYEE_ID",
    "LAST_NAME",
    "HREF",
    "E_MAIL",
    "CELLULAR_NUMBER",
    "PHONE_NUMBER",
    "IDENTIFICATION",
    "LOGIN",
    "MANAGER_ID",
    "BEGIN_OF_CONTRACT",
    "END_OF_CONTRACT",
    "PROFIL_ID",
    "LOCATION_ID",
    "LOCATION.LOCATION_CODE",
    "LOCATION.LOCATION_FR",
    "LOCATION.LOCATION_PATH",
    "LOCATION.CITY",
    "DEPARTMENT_ID",
    "DEPARTMENT.DEPARTMENT_CODE",
    "DEPARTMENT.DEPARTMENT_FR",
    "DEPARTMENT.DEPARTMENT_PATH",
    "DEPARTMENT.DEPARTMENT_LABEL",
];

/// Multi-valued attribute holding group identifiers.
pub const GROUPS_ATTRIBUTE: &str = "GROUPS";

pub(crate) const EMPLOYEE_ID: &str = "EMPLOYEE_ID";
pub(crate) const LAST_NAME: &str = "LAST_NAME";
pub(crate) const BEGIN_OF_CONTRACT: &str = "BEGIN_OF_CONTRACT";
pub(crate) const END_OF_CONTRACT: &str = "END_OF_CONTRACT";
pub(crate) const PROFIL_ID: &str = "PROFIL_ID";

/// A directory employee as seen by the identity platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Employee id
    pub identity: String,
    /// Last name, secondary identifier only
    pub uuid: String,
    pub attributes: Attributes,
    #[serde(default)]
    pub disabled: bool,
}

impl Account {
    /// Shape a raw employee record.
    ///
    /// The record must carry `LOCATION` and `DEPARTMENT` objects; missing
    /// scalar fields become `null`. `GROUPS` starts empty and `disabled`
    /// starts false, both are filled in by enrichment.
    pub fn from_record(record: &Value) -> ConnectorResult<Self> {
        let record = record
            .as_object()
            .ok_or_else(|| ConnectorError::malformed("employee"))?;

        let mut attributes = Attributes::new();
        for field in ACCOUNT_FIELDS {
            let (name, value) = match field.split_once('.') {
                Some((parent, child)) => {
                    let nested = nested_object(record, parent)?;
                    (child, nested.get(child))
                }
                None => (field, record.get(field)),
            };
            attributes.insert(name.to_string(), value.cloned().unwrap_or(Value::Null));
        }
        attributes.insert(GROUPS_ATTRIBUTE.to_string(), Value::Array(Vec::new()));

        let identity = attributes
            .get(EMPLOYEE_ID)
            .and_then(id_string)
            .ok_or_else(|| ConnectorError::malformed(EMPLOYEE_ID))?;
        let uuid = attributes
            .get(LAST_NAME)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            identity,
            uuid,
            attributes,
            disabled: false,
        })
    }

    /// Replace the group membership with the given identifiers.
    pub fn set_groups(&mut self, groups: Vec<String>) {
        let groups = groups.into_iter().map(Value::String).collect();
        self.attributes
            .insert(GROUPS_ATTRIBUTE.to_string(), Value::Array(groups));
    }

    pub fn groups(&self) -> Vec<&str> {
        self.attributes
            .get(GROUPS_ATTRIBUTE)
            .and_then(Value::as_array)
            .map(|groups| groups.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Convert contract dates from wire format to directory format.
    ///
    /// An account whose contract began at or before `now` is disabled. Empty
    /// or null dates are left untouched.
    pub fn apply_contract_dates<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
    ) -> ConnectorResult<()> {
        if let Some(begin) = self.contract_date(BEGIN_OF_CONTRACT)? {
            if begin.has_started(now) {
                self.disabled = true;
            }
            self.attributes.insert(
                BEGIN_OF_CONTRACT.to_string(),
                Value::String(begin.to_directory()),
            );
        }
        if let Some(end) = self.contract_date(END_OF_CONTRACT)? {
            self.attributes.insert(
                END_OF_CONTRACT.to_string(),
                Value::String(end.to_directory()),
            );
        }
        Ok(())
    }

    fn contract_date(&self, attribute: &str) -> ConnectorResult<Option<ContractDate>> {
        match self.attributes.get(attribute) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => ContractDate::from_wire(s).map(Some),
            Some(_) => Err(ConnectorError::malformed(attribute)),
        }
    }
}

fn nested_object<'a>(
    record: &'a Map<String, Value>,
    parent: &str,
) -> ConnectorResult<&'a Map<String, Value>> {
    record
        .get(parent)
        .and_then(Value::as_object)
        .ok_or_else(|| ConnectorError::malformed(parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn raw_employee() -> Value {
        json!({
            "EMPLOYEE_ID": 1042,
            "LAST_NAME": "Durand",
            "HREF": "https://itsm.example.com/api/v1/50004/employees/1042",
            "E_MAIL": "jdurand@example.com",
            "CELLULAR_NUMBER": "+33600000000",
            "PHONE_NUMBER": "+33100000000",
            "IDENTIFICATION": "JD42",
            "LOGIN": "jdurand",
            "MANAGER_ID": 7,
            "BEGIN_OF_CONTRACT": "2024-03-01",
            "END_OF_CONTRACT": "",
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

    #[test]
    fn test_from_record_flattens_nested_objects() {
        let account = Account::from_record(&raw_employee()).unwrap();

        assert_eq!(account.identity, "1042");
        assert_eq!(account.uuid, "Durand");
        assert!(!account.disabled);
        assert_eq!(account.attributes.len(), 23);
        assert_eq!(account.attributes["LOCATION_CODE"], json!("PAR"));
        assert_eq!(account.attributes["LOCATION_PATH"], json!("France/Paris"));
        assert_eq!(account.attributes["CITY"], json!("Paris"));
        assert_eq!(account.attributes["DEPARTMENT_LABEL"], json!("IT"));
        assert_eq!(account.attributes["GROUPS"], json!([]));
        assert!(!account.attributes.contains_key("LOCATION"));
        assert!(!account.attributes.contains_key("DEPARTMENT"));
    }

    #[test]
    fn test_from_record_has_exactly_documented_keys() {
        let account = Account::from_record(&raw_employee()).unwrap();
        let mut expected: Vec<String> = ACCOUNT_FIELDS
            .iter()
            .map(|f| f.rsplit('.').next().unwrap().to_string())
            .collect();
        expected.push(GROUPS_ATTRIBUTE.to_string());
        expected.sort();

        let mut keys: Vec<String> = account.attributes.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_from_record_does_not_touch_dates() {
        let account = Account::from_record(&raw_employee()).unwrap();
        assert_eq!(account.attributes["BEGIN_OF_CONTRACT"], json!("2024-03-01"));
        assert!(!account.disabled);
    }

    #[test]
    fn test_missing_nested_object_fails() {
        let mut raw = raw_employee();
        raw.as_object_mut().unwrap().remove("LOCATION");

        let err = Account::from_record(&raw).unwrap_err();
        assert!(matches!(err, ConnectorError::MalformedRecord { ref field } if field == "LOCATION"));
    }

    #[test]
    fn test_missing_employee_id_fails() {
        let mut raw = raw_employee();
        raw.as_object_mut().unwrap().remove("EMPLOYEE_ID");
        assert!(Account::from_record(&raw).is_err());
        assert!(Account::from_record(&json!([])).is_err());
    }

    #[test]
    fn test_missing_scalar_becomes_null() {
        let mut raw = raw_employee();
        raw.as_object_mut().unwrap().remove("E_MAIL");

        let account = Account::from_record(&raw).unwrap();
        assert_eq!(account.attributes["E_MAIL"], Value::Null);
    }

    #[test]
    fn test_past_contract_start_disables() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut account = Account::from_record(&raw_employee()).unwrap();

        account.apply_contract_dates(&now).unwrap();
        assert!(account.disabled);
        assert_eq!(account.attributes["BEGIN_OF_CONTRACT"], json!("01/03/2024"));
        assert_eq!(account.attributes["END_OF_CONTRACT"], json!(""));
    }

    #[test]
    fn test_future_contract_start_stays_enabled() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let mut raw = raw_employee();
        raw["END_OF_CONTRACT"] = json!("2025-12-31");
        let mut account = Account::from_record(&raw).unwrap();

        account.apply_contract_dates(&now).unwrap();
        assert!(!account.disabled);
        assert_eq!(account.attributes["BEGIN_OF_CONTRACT"], json!("01/03/2024"));
        assert_eq!(account.attributes["END_OF_CONTRACT"], json!("31/12/2025"));
    }

    #[test]
    fn test_empty_dates_pass_through() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut raw = raw_employee();
        raw["BEGIN_OF_CONTRACT"] = json!("");
        let mut account = Account::from_record(&raw).unwrap();

        account.apply_contract_dates(&now).unwrap();
        assert!(!account.disabled);
        assert_eq!(account.attributes["BEGIN_OF_CONTRACT"], json!(""));
    }

    #[test]
    fn test_unparseable_date_fails() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut raw = raw_employee();
        raw["END_OF_CONTRACT"] = json!("someday");
        let mut account = Account::from_record(&raw).unwrap();

        let err = account.apply_contract_dates(&now).unwrap_err();
        assert_eq!(err.code(), "INVALID_DATE");
    }

    #[test]
    fn test_set_groups() {
        let mut account = Account::from_record(&raw_employee()).unwrap();
        account.set_groups(vec!["10".to_string(), "20".to_string()]);
        assert_eq!(account.groups(), vec!["10", "20"]);
    }

    #[test]
    fn test_serialized_shape() {
        let account = Account::from_record(&raw_employee()).unwrap();
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["identity"], json!("1042"));
        assert_eq!(value["uuid"], json!("Durand"));
        assert_eq!(value["disabled"], json!(false));
        assert!(value["attributes"].is_object());
    }
}
