//! Ordered directory mutations.
//!
//! Multi-call operations (group assignment on create, discrete changes on
//! update) are first planned as a list of [`DirectoryStep`]s and then run by
//! [`execute_steps`]. Steps run one at a time in list order; the first
//! failure aborts the remaining steps and already applied steps are not
//! rolled back.

use super::commands::{AttributeChange, AttributeChangeOp};
use crate::client::EasyVistaClient;
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::{Attributes, EMPLOYEE_ID, GROUPS_ATTRIBUTE, PROFIL_ID, id_string};
use log::{debug, warn};
use serde_json::Value;
use std::fmt;

/// One remote mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryStep {
    AddGroupMember {
        group_id: String,
        employee_id: String,
    },
    RemoveGroupMember {
        group_id: String,
        employee_id: String,
    },
    UpdateEmployee {
        employee_id: String,
        payload: Attributes,
    },
}

impl DirectoryStep {
    pub async fn apply(&self, client: &EasyVistaClient) -> ConnectorResult<()> {
        match self {
            Self::AddGroupMember {
                group_id,
                employee_id,
            } => client.add_group_member(group_id, employee_id).await,
            Self::RemoveGroupMember {
                group_id,
                employee_id,
            } => client.remove_group_member(group_id, employee_id).await,
            Self::UpdateEmployee {
                employee_id,
                payload,
            } => client.update_account(employee_id, payload).await,
        }
    }
}

impl fmt::Display for DirectoryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddGroupMember {
                group_id,
                employee_id,
            } => write!(f, "add employee {} to group {}", employee_id, group_id),
            Self::RemoveGroupMember {
                group_id,
                employee_id,
            } => write!(f, "remove employee {} from group {}", employee_id, group_id),
            Self::UpdateEmployee {
                employee_id,
                payload,
            } => {
                let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
                write!(f, "update employee {} ({})", employee_id, keys.join(", "))
            }
        }
    }
}

/// Run steps in order, stopping at the first failure.
pub async fn execute_steps(
    client: &EasyVistaClient,
    steps: &[DirectoryStep],
) -> ConnectorResult<()> {
    for (index, step) in steps.iter().enumerate() {
        debug!("Step {}/{}: {}", index + 1, steps.len(), step);
        if let Err(e) = step.apply(client).await {
            warn!(
                "Step {}/{} failed ({}), skipping {} remaining step(s): {}",
                index + 1,
                steps.len(),
                step,
                steps.len() - index - 1,
                e
            );
            return Err(e);
        }
    }
    Ok(())
}

/// One membership step per group identifier.
pub fn plan_group_additions(employee_id: &str, groups: &[String]) -> Vec<DirectoryStep> {
    groups
        .iter()
        .map(|group_id| DirectoryStep::AddGroupMember {
            group_id: group_id.clone(),
            employee_id: employee_id.to_string(),
        })
        .collect()
}

/// Translate discrete attribute changes into steps, keeping their order.
///
/// `GROUPS` changes become membership calls, `PROFIL_ID` changes carry the
/// employee id alongside the profile, anything else becomes a single-key
/// partial update.
pub fn plan_changes(
    employee_id: &str,
    changes: &[AttributeChange],
) -> ConnectorResult<Vec<DirectoryStep>> {
    let mut steps = Vec::with_capacity(changes.len());

    for change in changes {
        match change.attribute.as_str() {
            GROUPS_ATTRIBUTE => {
                for group_id in group_ids(&change.value)? {
                    let step = if change.op == AttributeChangeOp::Remove {
                        DirectoryStep::RemoveGroupMember {
                            group_id,
                            employee_id: employee_id.to_string(),
                        }
                    } else {
                        DirectoryStep::AddGroupMember {
                            group_id,
                            employee_id: employee_id.to_string(),
                        }
                    };
                    steps.push(step);
                }
            }
            PROFIL_ID => {
                let profile = if change.op == AttributeChangeOp::Remove {
                    Value::String(String::new())
                } else {
                    change.value.clone()
                };
                let mut payload = Attributes::new();
                payload.insert(PROFIL_ID.to_string(), profile);
                payload.insert(
                    EMPLOYEE_ID.to_string(),
                    Value::String(employee_id.to_string()),
                );
                steps.push(DirectoryStep::UpdateEmployee {
                    employee_id: employee_id.to_string(),
                    payload,
                });
            }
            attribute => {
                let mut payload = Attributes::new();
                payload.insert(attribute.to_string(), change.value.clone());
                steps.push(DirectoryStep::UpdateEmployee {
                    employee_id: employee_id.to_string(),
                    payload,
                });
            }
        }
    }

    Ok(steps)
}

/// Group identifiers carried by a `GROUPS` value: a single id, a list of
/// ids, or nothing.
pub fn group_ids(value: &Value) -> ConnectorResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(values) => values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| id_string(v).ok_or_else(|| invalid_group(v)))
            .collect(),
        other => id_string(other)
            .map(|id| vec![id])
            .ok_or_else(|| invalid_group(other)),
    }
}

fn invalid_group(value: &Value) -> ConnectorError {
    ConnectorError::invalid_input(format!("invalid group identifier {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(op: AttributeChangeOp, attribute: &str, value: Value) -> AttributeChange {
        AttributeChange::new(op, attribute, value)
    }

    #[test]
    fn test_groups_remove_plans_removal() {
        let steps = plan_changes(
            "1042",
            &[change(AttributeChangeOp::Remove, "GROUPS", json!("10"))],
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![DirectoryStep::RemoveGroupMember {
                group_id: "10".to_string(),
                employee_id: "1042".to_string(),
            }]
        );
    }

    #[test]
    fn test_groups_add_and_set_plan_addition() {
        for op in [AttributeChangeOp::Add, AttributeChangeOp::Set] {
            let steps = plan_changes("1042", &[change(op, "GROUPS", json!(10))]).unwrap();
            assert_eq!(
                steps,
                vec![DirectoryStep::AddGroupMember {
                    group_id: "10".to_string(),
                    employee_id: "1042".to_string(),
                }]
            );
        }
    }

    #[test]
    fn test_groups_list_value_expands_in_order() {
        let steps = plan_changes(
            "1042",
            &[change(AttributeChangeOp::Add, "GROUPS", json!(["10", "20"]))],
        )
        .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].to_string(), "add employee 1042 to group 10");
        assert_eq!(steps[1].to_string(), "add employee 1042 to group 20");
    }

    #[test]
    fn test_profil_remove_sends_empty_string() {
        let steps = plan_changes(
            "1042",
            &[change(AttributeChangeOp::Remove, "PROFIL_ID", json!(3))],
        )
        .unwrap();
        let DirectoryStep::UpdateEmployee { payload, .. } = &steps[0] else {
            panic!("expected update step");
        };
        assert_eq!(payload["PROFIL_ID"], json!(""));
        assert_eq!(payload["EMPLOYEE_ID"], json!("1042"));
    }

    #[test]
    fn test_profil_set_sends_literal_value() {
        let steps = plan_changes(
            "1042",
            &[change(AttributeChangeOp::Set, "PROFIL_ID", json!(7))],
        )
        .unwrap();
        let DirectoryStep::UpdateEmployee { payload, .. } = &steps[0] else {
            panic!("expected update step");
        };
        assert_eq!(payload["PROFIL_ID"], json!(7));
        assert_eq!(payload["EMPLOYEE_ID"], json!("1042"));
    }

    #[test]
    fn test_other_attributes_are_not_coalesced() {
        let steps = plan_changes(
            "1042",
            &[
                change(AttributeChangeOp::Set, "E_MAIL", json!("a@example.com")),
                change(AttributeChangeOp::Set, "LOGIN", json!("jdurand")),
                change(AttributeChangeOp::Set, "E_MAIL", json!("b@example.com")),
            ],
        )
        .unwrap();

        assert_eq!(steps.len(), 3);
        let payloads: Vec<&Attributes> = steps
            .iter()
            .map(|step| match step {
                DirectoryStep::UpdateEmployee { payload, .. } => payload,
                other => panic!("unexpected step {:?}", other),
            })
            .collect();
        assert_eq!(payloads[0].len(), 1);
        assert_eq!(payloads[0]["E_MAIL"], json!("a@example.com"));
        assert_eq!(payloads[1]["LOGIN"], json!("jdurand"));
        assert_eq!(payloads[2]["E_MAIL"], json!("b@example.com"));
    }

    #[test]
    fn test_group_ids() {
        assert_eq!(group_ids(&json!(null)).unwrap(), Vec::<String>::new());
        assert_eq!(group_ids(&json!("10")).unwrap(), vec!["10"]);
        assert_eq!(group_ids(&json!([10, null, "20"])).unwrap(), vec!["10", "20"]);
        assert!(group_ids(&json!({"id": 10})).is_err());
        assert!(group_ids(&json!([true])).is_err());
    }

    #[test]
    fn test_plan_group_additions() {
        let steps = plan_group_additions("E1", &["10".to_string(), "20".to_string()]);
        assert_eq!(
            steps,
            vec![
                DirectoryStep::AddGroupMember {
                    group_id: "10".to_string(),
                    employee_id: "E1".to_string(),
                },
                DirectoryStep::AddGroupMember {
                    group_id: "20".to_string(),
                    employee_id: "E1".to_string(),
                },
            ]
        );
    }
}
