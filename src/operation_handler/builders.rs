//! Convenience constructors for [`StdCommand`].

use super::commands::*;
use crate::model::Attributes;

impl StdCommand {
    pub fn test_connection() -> Self {
        Self::TestConnection(StdTestConnectionInput {})
    }

    pub fn account_list() -> Self {
        Self::AccountList(StdAccountListInput {})
    }

    pub fn account_read(identity: impl Into<String>) -> Self {
        Self::AccountRead(StdAccountReadInput {
            identity: identity.into(),
        })
    }

    pub fn account_create(attributes: Attributes) -> Self {
        Self::AccountCreate(StdAccountCreateInput { attributes })
    }

    /// Update carrying discrete changes.
    pub fn account_update(identity: impl Into<String>, changes: Vec<AttributeChange>) -> Self {
        Self::AccountUpdate(StdAccountUpdateInput {
            identity: identity.into(),
            changes: Some(changes),
            attributes: None,
        })
    }

    /// Update carrying a full attribute set, as sent by attribute sync.
    pub fn account_sync(identity: impl Into<String>, attributes: Attributes) -> Self {
        Self::AccountUpdate(StdAccountUpdateInput {
            identity: identity.into(),
            changes: None,
            attributes: Some(attributes),
        })
    }

    pub fn account_disable(identity: impl Into<String>) -> Self {
        Self::AccountDisable(StdAccountDisableInput {
            identity: identity.into(),
        })
    }

    pub fn account_enable(identity: impl Into<String>) -> Self {
        Self::AccountEnable(StdAccountEnableInput {
            identity: identity.into(),
        })
    }

    pub fn entitlement_list() -> Self {
        Self::EntitlementList(StdEntitlementListInput {
            entitlement_type: Some(crate::model::ENTITLEMENT_TYPE.to_string()),
        })
    }

    pub fn entitlement_read(identity: impl Into<String>) -> Self {
        Self::EntitlementRead(StdEntitlementReadInput {
            identity: identity.into(),
            entitlement_type: Some(crate::model::ENTITLEMENT_TYPE.to_string()),
        })
    }
}
