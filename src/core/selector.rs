//! Cross-layer provider resolution.
//!
//! The storage triple is fixed first (one joint decision); the layers adjacent
//! to hot storage are then resolved against it, each minimizing its own cost
//! *plus* the glue transfer — not the layer cost alone. A divergence from the
//! locally cheapest provider is recorded as an [`Override`].

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    core::{
        evaluator::ProviderCosts,
        graph::{Node, StorageGraph},
        layer::Layer,
        path::StoragePath,
        transfer::{Route, transfer_cost},
    },
    prelude::*,
    pricing::{Provider, RateCard},
    quantity::{cost::Cost, data::Gigabytes},
};

/// One provider's bid for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub provider: Provider,
    pub layer_cost: Cost,
    pub transfer: Cost,
    pub total: Cost,
}

/// A layer whose final provider diverges from its locally cheapest one,
/// with the comparison that justifies the divergence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Override {
    pub layer: Layer,
    pub selected: Provider,
    pub locally_cheapest: Provider,
    pub candidates: Vec<Candidate>,
}

/// Final provider per layer, plus every override that occurred.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resolution {
    pub ingestion: Provider,
    pub processing: Provider,
    pub twin: Provider,
    pub visualization: Provider,
    pub overrides: Vec<Override>,
}

/// Resolve L1, L2, L4 and L5 once the storage path is fixed, and derive the
/// storage-tier overrides from the graph.
pub fn resolve(
    costs: &BTreeMap<Provider, ProviderCosts>,
    graph: &StorageGraph,
    path: &StoragePath,
    volume: Gigabytes,
    card: &RateCard,
) -> Result<Resolution> {
    let hot = path.hot.provider;
    let mut overrides = Vec::new();

    // Ingested telemetry flows onward to the processing functions in front of
    // the chosen hot store:
    let ingestion = resolve_adjacent(Layer::Ingestion, costs, volume, card, &mut overrides, |p| {
        Route::new(Layer::Ingestion, p, Layer::Processing, hot)
    })?;
    // The persister writes into the chosen hot store:
    let processing =
        resolve_adjacent(Layer::Processing, costs, volume, card, &mut overrides, |p| {
            Route::new(Layer::Processing, p, Layer::HotStorage, hot)
        })?;
    // The twin reads live telemetry back out of the hot store, so the *hot*
    // side pays the egress:
    let twin = resolve_adjacent(Layer::TwinManagement, costs, volume, card, &mut overrides, |p| {
        Route::new(Layer::HotStorage, hot, Layer::TwinManagement, p)
    })?;

    // Nothing depends on the dashboards and no data route touches them, so
    // the locally cheapest provider always wins — never an override:
    let visualization = resolve_local(Layer::Visualization, costs)?;

    storage_override(Layer::CoolStorage, costs, graph, path.hot, path.cool, &mut overrides)?;
    storage_override(
        Layer::ArchiveStorage,
        costs,
        graph,
        path.cool,
        path.archive,
        &mut overrides,
    )?;

    Ok(Resolution { ingestion, processing, twin, visualization, overrides })
}

/// Pick the provider minimizing `layer cost + glue transfer`, recording an
/// [`Override`] when that is not the locally cheapest provider. Providers that
/// do not offer the layer are excluded from this comparison only.
fn resolve_adjacent(
    layer: Layer,
    costs: &BTreeMap<Provider, ProviderCosts>,
    volume: Gigabytes,
    card: &RateCard,
    overrides: &mut Vec<Override>,
    glue_route: impl Fn(Provider) -> Route,
) -> Result<Provider> {
    let mut candidates = Vec::with_capacity(costs.len());
    for (provider, provider_costs) in costs {
        let Some(layer_cost) = provider_costs.get(layer) else {
            continue;
        };
        let transfer = transfer_cost(glue_route(*provider), volume, card)?;
        candidates.push(Candidate {
            provider: *provider,
            layer_cost: layer_cost.total,
            transfer,
            total: layer_cost.total + transfer,
        });
    }

    let selected = cheapest_by(&candidates, |candidate| candidate.total)
        .with_context(|| format!("no provider offers {layer}"))?;
    let locally_cheapest = cheapest_by(&candidates, |candidate| candidate.layer_cost)
        .with_context(|| format!("no provider offers {layer}"))?;
    if selected != locally_cheapest {
        info!(%layer, %selected, %locally_cheapest, "overriding the locally cheapest provider");
        overrides.push(Override { layer, selected, locally_cheapest, candidates });
    }
    Ok(selected)
}

/// Pick the locally cheapest provider, ignoring transfers entirely.
fn resolve_local(layer: Layer, costs: &BTreeMap<Provider, ProviderCosts>) -> Result<Provider> {
    let candidates: Vec<Candidate> = costs
        .iter()
        .filter_map(|(provider, provider_costs)| {
            provider_costs.get(layer).map(|layer_cost| Candidate {
                provider: *provider,
                layer_cost: layer_cost.total,
                transfer: Cost::ZERO,
                total: layer_cost.total,
            })
        })
        .collect();
    cheapest_by(&candidates, |candidate| candidate.total)
        .with_context(|| format!("no provider offers {layer}"))
}

/// Record an override when the path solver placed a storage tier away from its
/// locally cheapest provider. The candidate table is read off the graph edges
/// leaving the already-fixed upstream node.
fn storage_override(
    layer: Layer,
    costs: &BTreeMap<Provider, ProviderCosts>,
    graph: &StorageGraph,
    upstream: Node,
    chosen: Node,
    overrides: &mut Vec<Override>,
) -> Result<()> {
    let candidates: Vec<Candidate> = graph
        .edges
        .iter()
        .filter(|edge| edge.from == upstream && edge.to.tier == layer)
        .map(|edge| Candidate {
            provider: edge.to.provider,
            layer_cost: edge.storage,
            transfer: edge.transfer,
            total: edge.weight,
        })
        .collect();
    let locally_cheapest = costs
        .iter()
        .filter_map(|(provider, provider_costs)| {
            provider_costs.get(layer).map(|layer_cost| (*provider, layer_cost.total))
        })
        .min_by_key(|(provider, total)| (OrderedFloat(total.0), *provider))
        .map(|(provider, _)| provider)
        .with_context(|| format!("no provider offers {layer}"))?;
    if chosen.provider != locally_cheapest {
        info!(
            %layer,
            selected = %chosen.provider,
            %locally_cheapest,
            "the storage path overrides the locally cheapest tier provider",
        );
        overrides.push(Override {
            layer,
            selected: chosen.provider,
            locally_cheapest,
            candidates,
        });
    }
    Ok(())
}

fn cheapest_by(
    candidates: &[Candidate],
    cost: impl Fn(&Candidate) -> Cost,
) -> Option<Provider> {
    candidates
        .iter()
        .min_by_key(|candidate| (OrderedFloat(cost(candidate).0), candidate.provider))
        .map(|candidate| candidate.provider)
}
