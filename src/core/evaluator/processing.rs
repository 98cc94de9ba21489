use std::collections::BTreeMap;

use crate::{
    core::{evaluator::per_million, layer::LayerCost, workload::Workload},
    prelude::*,
    pricing::{FunctionRates, Provider, ProviderRates},
    quantity::{cost::Cost, data::Gigabytes},
};

/// Per-invocation footprint of the pipeline functions: 128 MB for 100 ms.
const GB_SECONDS_PER_INVOCATION: f64 = 0.125 * 0.1;

/// L2: the dispatcher routes every message, the persister writes it to hot
/// storage, and an optional orchestrator runs scheduled workflows. The
/// persister forwards everything it receives.
pub fn evaluate(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
    inflow: Gigabytes,
) -> Result<(LayerCost, Gigabytes)> {
    let rates = rates
        .functions
        .as_ref()
        .with_context(|| format!("missing function rates for {provider}"))?;

    let messages = workload.messages_per_month();
    let mut components = BTreeMap::from([
        ("dispatcher", invocation_cost(rates, messages)),
        ("persister", invocation_cost(rates, messages)),
    ]);
    if let Some(runs) = workload.orchestration_runs {
        components.insert("orchestrator", invocation_cost(rates, runs));
    }

    let cost = LayerCost::new(components, Some(inflow));
    trace!(%provider, total = %cost.total, "processing priced");
    Ok((cost, inflow))
}

#[expect(clippy::cast_precision_loss)]
fn invocation_cost(rates: &FunctionRates, invocations: u64) -> Cost {
    rates.per_million_invocations * per_million(invocations)
        + rates.per_gb_second * (invocations as f64 * GB_SECONDS_PER_INVOCATION)
}
