//! Standardized command and input types.
//!
//! Commands arrive as `{"type": "std:account:read", "input": {...}}`
//! documents; each variant carries the typed input of one standardized
//! operation.

use crate::model::Attributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdTestConnectionInput {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdAccountListInput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdAccountReadInput {
    pub identity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdAccountCreateInput {
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdAccountUpdateInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<AttributeChange>>,
    /// Full attribute set, sent by attribute sync instead of `changes`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdAccountDisableInput {
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdAccountEnableInput {
    pub identity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdEntitlementListInput {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entitlement_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdEntitlementReadInput {
    pub identity: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entitlement_type: Option<String>,
}

/// Kind of a discrete attribute mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeChangeOp {
    Add,
    Set,
    Remove,
}

/// One discrete attribute mutation supplied to an account update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub op: AttributeChangeOp,
    pub attribute: String,
    #[serde(default)]
    pub value: Value,
}

impl AttributeChange {
    pub fn new(op: AttributeChangeOp, attribute: impl Into<String>, value: Value) -> Self {
        Self {
            op,
            attribute: attribute.into(),
            value,
        }
    }
}

/// A standardized operation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input")]
pub enum StdCommand {
    #[serde(rename = "std:test-connection")]
    TestConnection(StdTestConnectionInput),
    #[serde(rename = "std:account:list")]
    AccountList(StdAccountListInput),
    #[serde(rename = "std:account:read")]
    AccountRead(StdAccountReadInput),
    #[serde(rename = "std:account:create")]
    AccountCreate(StdAccountCreateInput),
    #[serde(rename = "std:account:update")]
    AccountUpdate(StdAccountUpdateInput),
    #[serde(rename = "std:account:disable")]
    AccountDisable(StdAccountDisableInput),
    #[serde(rename = "std:account:enable")]
    AccountEnable(StdAccountEnableInput),
    #[serde(rename = "std:entitlement:list")]
    EntitlementList(StdEntitlementListInput),
    #[serde(rename = "std:entitlement:read")]
    EntitlementRead(StdEntitlementReadInput),
}

impl StdCommand {
    /// Wire name of the command, as found in its `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TestConnection(_) => "std:test-connection",
            Self::AccountList(_) => "std:account:list",
            Self::AccountRead(_) => "std:account:read",
            Self::AccountCreate(_) => "std:account:create",
            Self::AccountUpdate(_) => "std:account:update",
            Self::AccountDisable(_) => "std:account:disable",
            Self::AccountEnable(_) => "std:account:enable",
            Self::EntitlementList(_) => "std:entitlement:list",
            Self::EntitlementRead(_) => "std:entitlement:read",
        }
    }

    /// Identity targeted by the command, if any.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::AccountRead(input) => Some(&input.identity),
            Self::AccountUpdate(input) => Some(&input.identity),
            Self::AccountDisable(input) => Some(&input.identity),
            Self::AccountEnable(input) => Some(&input.identity),
            Self::EntitlementRead(input) => Some(&input.identity),
            _ => None,
        }
    }
}
