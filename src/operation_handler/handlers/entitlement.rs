//! Entitlement operation handlers.

use super::require_identity;
use crate::error::ConnectorResult;
use crate::model::Entitlement;
use crate::operation_handler::commands::{StdEntitlementListInput, StdEntitlementReadInput};
use crate::operation_handler::core::ConnectorContext;
use crate::operation_handler::sink::ResponseSink;
use log::{debug, info};

/// Emit every directory group, named in the configured language.
pub async fn entitlement_list<S: ResponseSink>(
    ctx: &ConnectorContext,
    _input: StdEntitlementListInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let listing = ctx.client.list_groups(None).await?;
    info!("Listing {} entitlement(s)", listing.records.len());

    for record in &listing.records {
        let group = Entitlement::from_record(record, &ctx.language)?;
        debug!("Emitting entitlement {}", group.identity);
        res.send(&group)?;
    }
    Ok(())
}

/// Emit one directory group.
pub async fn entitlement_read<S: ResponseSink>(
    ctx: &ConnectorContext,
    input: StdEntitlementReadInput,
    res: &mut S,
) -> ConnectorResult<()> {
    let identity = require_identity(&input.identity, "entitlement read")?;
    info!("Reading entitlement {}", identity);

    let record = ctx.client.get_group(identity).await?;
    let group = Entitlement::from_record(&record, &ctx.language)?;
    debug!("Emitting entitlement {}", group.identity);
    res.send(&group)
}
