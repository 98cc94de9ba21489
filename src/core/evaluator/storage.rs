use std::collections::BTreeMap;

use crate::{
    core::{evaluator::per_million, layer::LayerCost, workload::Workload},
    prelude::*,
    pricing::{Provider, ProviderRates},
    quantity::{data::Gigabytes, time::Months},
};

/// L3 hot: retained volume, write units for every ingested message, read units
/// for every dashboard query.
pub fn hot(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
    inflow: Gigabytes,
) -> Result<(LayerCost, Gigabytes)> {
    let rates = rates
        .hot_storage
        .as_ref()
        .with_context(|| format!("missing hot storage rates for {provider}"))?;

    let storage = inflow * Months::from_u32(workload.hot_months) * rates.per_gb_month;
    let writes = rates.writes_per_million * per_million(workload.messages_per_month());
    let reads = rates.reads_per_million * per_million(workload.dashboard_queries_per_month());

    let cost = LayerCost::new(
        BTreeMap::from([("storage", storage), ("writes", writes), ("reads", reads)]),
        Some(inflow),
    );
    trace!(%provider, total = %cost.total, "hot storage priced");
    Ok((cost, inflow))
}

/// L3 cool: retained volume only.
pub fn cool(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
    inflow: Gigabytes,
) -> Result<(LayerCost, Gigabytes)> {
    let rates = rates
        .cool_storage
        .as_ref()
        .with_context(|| format!("missing cool storage rates for {provider}"))?;

    let storage = inflow * Months::from_u32(workload.cool_months) * rates.per_gb_month;
    let cost = LayerCost::new(BTreeMap::from([("storage", storage)]), Some(inflow));
    trace!(%provider, total = %cost.total, "cool storage priced");
    Ok((cost, inflow))
}

/// L3 archive: retained volume, floored at the provider's minimum billable
/// duration — the floor is part of the formula, not a separate correction.
pub fn archive(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
    inflow: Gigabytes,
) -> Result<LayerCost> {
    let rates = rates
        .archive_storage
        .as_ref()
        .with_context(|| format!("missing archive storage rates for {provider}"))?;

    let billable_months = workload.archive_months.max(rates.minimum_billable_months);
    let storage = inflow * Months::from_u32(billable_months) * rates.per_gb_month;
    let cost = LayerCost::new(BTreeMap::from([("storage", storage)]), None);
    trace!(%provider, total = %cost.total, "archive storage priced");
    Ok(cost)
}
