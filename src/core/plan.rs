use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    core::{
        evaluator::{self, ProviderCosts},
        graph::StorageGraph,
        layer::Layer,
        path::{StoragePath, cheapest_path},
        selector::{self, Override},
        transfer::{self, Route, RouteCost, transfer_cost},
        workload::Workload,
    },
    prelude::*,
    pricing::{Provider, RateCard},
    quantity::{cost::Cost, data::Gigabytes},
};

/// The full planning result. Pure assembly — every number in here was computed
/// by an evaluator, the transfer model, the path solver or the selector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    /// Every (provider, layer) evaluation, including the losing bids.
    pub layer_costs: BTreeMap<Provider, ProviderCosts>,

    /// Final provider per layer.
    pub resolved: BTreeMap<Layer, Provider>,

    /// The resolved pipeline as path tokens, L1 through L5.
    pub cheapest_path: Vec<String>,

    /// The joint hot/cool/archive decision.
    pub storage_path: StoragePath,

    /// One record per layer whose provider diverges from its local optimum.
    pub overrides: Vec<Override>,

    /// Every topology route priced at this month's volume, for audit.
    pub transfers: Vec<RouteCost>,

    /// Monthly bill of the resolved pipeline, glue transfers included.
    pub total: Cost,
}

/// Price the workload on every provider of the card and pick the cheapest
/// provider split for the whole pipeline.
///
/// Synchronous and stateless: identical inputs produce identical output.
#[instrument(skip_all, fields(devices = workload.devices))]
pub fn plan(workload: &Workload, card: &RateCard) -> Result<Plan> {
    workload.validate()?;
    let providers = card.providers();

    let mut layer_costs = BTreeMap::new();
    for provider in providers {
        layer_costs.insert(provider, evaluator::evaluate(provider, workload, card)?);
    }

    let volume = workload.ingested_gb();
    let graph = StorageGraph::build(providers, &layer_costs, volume, card)?;
    let storage_path = cheapest_path(providers, &graph)?;
    let resolution = selector::resolve(&layer_costs, &graph, &storage_path, volume, card)?;

    let resolved = BTreeMap::from([
        (Layer::Ingestion, resolution.ingestion),
        (Layer::Processing, resolution.processing),
        (Layer::HotStorage, storage_path.hot.provider),
        (Layer::CoolStorage, storage_path.cool.provider),
        (Layer::ArchiveStorage, storage_path.archive.provider),
        (Layer::TwinManagement, resolution.twin),
        (Layer::Visualization, resolution.visualization),
    ]);
    let cheapest_path =
        Layer::ALL.iter().map(|layer| layer.token(resolved[layer])).collect::<Vec<_>>();
    let total = grand_total(&layer_costs, &resolved, volume, card)?;
    info!(total = %total, path = %cheapest_path.join(" → "), "planned");

    Ok(Plan {
        layer_costs,
        resolved,
        cheapest_path,
        storage_path,
        overrides: resolution.overrides,
        transfers: transfer::audit(providers, volume, card)?,
        total,
    })
}

/// Sum the resolved layers plus the glue transfers between adjacent resolved
/// layers.
fn grand_total(
    layer_costs: &BTreeMap<Provider, ProviderCosts>,
    resolved: &BTreeMap<Layer, Provider>,
    volume: Gigabytes,
    card: &RateCard,
) -> Result<Cost> {
    let mut total = Cost::ZERO;
    for (layer, provider) in resolved {
        total += layer_costs
            .get(provider)
            .and_then(|costs| costs.get(*layer))
            .with_context(|| format!("missing {layer} costs for {provider}"))?
            .total;
    }
    for (from_layer, to_layer) in [
        (Layer::Ingestion, Layer::Processing),
        (Layer::Processing, Layer::HotStorage),
        (Layer::HotStorage, Layer::CoolStorage),
        (Layer::CoolStorage, Layer::ArchiveStorage),
        (Layer::HotStorage, Layer::TwinManagement),
    ] {
        let route =
            Route::new(from_layer, resolved[&from_layer], to_layer, resolved[&to_layer]);
        total += transfer_cost(route, volume, card)?;
    }
    Ok(total)
}
