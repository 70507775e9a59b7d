//! Shaped records emitted on the standardized operation surface.
//!
//! - [`Account`] - one directory employee, flattened to a fixed attribute set
//! - [`Entitlement`] - one directory group
//!
//! Shaping is pure: nothing in this module performs I/O.

mod account;
mod group;

pub use account::{ACCOUNT_FIELDS, Account, GROUPS_ATTRIBUTE};
pub(crate) use account::{END_OF_CONTRACT, EMPLOYEE_ID, PROFIL_ID};
pub use group::{ENTITLEMENT_TYPE, Entitlement};

use serde_json::{Map, Value};

/// Flat attribute mapping carried by accounts and entitlements.
pub type Attributes = Map<String, Value>;

/// Extract the identifier at the tail of a directory resource URL.
///
/// `https://host/api/v1/50004/groups/42` yields `"42"`. A URL ending with a
/// slash yields an empty string.
pub fn url_to_id(url: &str) -> String {
    url.rsplit('/').next().unwrap_or_default().to_string()
}

/// Render a scalar identifier field as a string.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
