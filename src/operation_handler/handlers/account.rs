//! Account operation handlers.
//!
//! Every handler that emits an account re-reads the employee from the
//! directory and runs it through [`build_account`], so outputs always
//! reflect the directory state after the operation.

use super::require_identity;
use crate::dates::{self, ContractDate};
use crate::error::{ConnectorError, ConnectorResult};
use crate::model::{Account, Attributes, END_OF_CONTRACT, GROUPS_ATTRIBUTE, url_to_id};
use crate::operation_handler::commands::{
    StdAccountCreateInput, StdAccountDisableInput, StdAccountEnableInput, StdAccountListInput,
    StdAccountReadInput, StdAccountUpdateInput,
};
use crate::operation_handler::core::ConnectorContext;
use crate::operation_handler::sink::ResponseSink;
use crate::operation_handler::steps::{
    execute_steps, group_ids, plan_changes, plan_group_additions,
};
use log::{debug, info, warn};
use serde_json::Value;

/// Shape a raw employee and enrich it with group membership and contract
/// state.
pub async fn build_account(ctx: &ConnectorContext, record: &Value) -> ConnectorResult<Account> {
    let mut account = Account::from_record(record)?;

    let membership = ctx.client.get_group_membership(&account.identity).await?;
    account.set_groups(membership.groups.iter().map(|url| url_to_id(url)).collect());
    account.apply_contract_dates(&dates::now())?;

    Ok(account)
}

async fn fetch_account(ctx: &ConnectorContext, identity: &str) -> ConnectorResult<Account> {
    let record = ctx.client.get_account(identity).await?;
    build_account(ctx, &record).await
}

fn emit<S: ResponseSink>(res: &mut S, account: &Account) -> ConnectorResult<()> {
    debug!(
        "Emitting account {} (disabled: {})",
        account.identity, account.disabled
    );
    res.send(account)
}

/// Emit every employee of the directory, in listing order.
pub async fn account_list<S: ResponseSink>(
    ctx: &ConnectorContext,
    _input: StdAccountListInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let listing = ctx.client.list_employees(None).await?;
    info!("Listing {} account(s)", listing.records.len());

    for record in &listing.records {
        let account = build_account(ctx, record).await?;
        emit(res, &account)?;
    }
    Ok(())
}

/// Emit one employee. Any failure is reported as not found.
pub async fn account_read<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdAccountReadInput,
    res: &mut S,
) -> ConnectorResult<()> {
    info!("Reading account {}", input.identity);

    let result = fetch_account(ctx, &input.identity).await;
    result.and_then(|account| emit(res, &account)).map_err(|e| {
        debug!("Account {} read failed: {}", input.identity, e);
        ConnectorError::not_found("Account", input.identity.clone())
    })
}

/// Create an employee, then add it to the requested groups one by one.
///
/// `GROUPS` is not part of the employee payload. The new employee id is the
/// last segment of the returned `HREF`.
pub async fn account_create<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdAccountCreateInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let mut employee: Attributes = input.attributes;
    let groups = match employee.remove(GROUPS_ATTRIBUTE) {
        Some(value) => group_ids(&value)?,
        None => Vec::new(),
    };

    let created = ctx.client.create_account(&employee).await?;
    let employee_id = url_to_id(&created.href);
    if employee_id.is_empty() {
        return Err(ConnectorError::malformed("HREF"));
    }
    info!(
        "Created employee {}, assigning {} group(s)",
        employee_id,
        groups.len()
    );

    execute_steps(&ctx.client, &plan_group_additions(&employee_id, &groups)).await?;

    let account = fetch_account(ctx, &employee_id).await?;
    emit(res, &account)
}

/// Apply discrete attribute changes in order.
///
/// A full attribute set without discrete changes comes from attribute sync,
/// which the directory connector does not support: it is logged and nothing
/// is written.
pub async fn account_update<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdAccountUpdateInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let identity = require_identity(&input.identity, "account update")?;

    match (&input.changes, &input.attributes) {
        (Some(changes), _) => {
            info!("Applying {} change(s) to account {}", changes.len(), identity);
            let steps = plan_changes(identity, changes)?;
            execute_steps(&ctx.client, &steps).await?;
        }
        (None, Some(_)) => {
            warn!(
                "No changes detected in account update. Please report unless you used attribute sync which is not supported."
            );
        }
        (None, None) => {
            debug!("Account update for {} carried nothing to apply", identity);
        }
    }

    let account = fetch_account(ctx, identity).await?;
    emit(res, &account)
}

/// End the contract yesterday.
pub async fn account_disable<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdAccountDisableInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let identity = require_identity(&input.identity, "account disable")?;
    let end = ContractDate::yesterday(&dates::now()).to_directory();
    info!("Disabling account {} (end of contract {})", identity, end);

    set_end_of_contract(ctx, identity, Value::String(end)).await?;

    let account = fetch_account(ctx, identity).await?;
    emit(res, &account)
}

/// Clear the end of contract.
pub async fn account_enable<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdAccountEnableInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let identity = require_identity(&input.identity, "account enable")?;
    info!("Enabling account {}", identity);

    set_end_of_contract(ctx, identity, Value::String(String::new())).await?;

    let account = fetch_account(ctx, identity).await?;
    emit(res, &account)
}

async fn set_end_of_contract(
    ctx: &ConnectorContext,
    identity: &str,
    end: Value,
) -> ConnectorResult<()> {
    let mut payload = Attributes::new();
    payload.insert(END_OF_CONTRACT.to_string(), end);
    ctx.client.update_account(identity, &payload).await
}
