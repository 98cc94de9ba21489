use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use enumset::EnumSet;
use itertools::iproduct;
use serde::Serialize;

use crate::{
    core::{
        evaluator::ProviderCosts,
        layer::Layer,
        transfer::{Route, transfer_cost},
    },
    prelude::*,
    pricing::{Provider, RateCard},
    quantity::{cost::Cost, data::Gigabytes},
};

/// A storage tier pinned to one cloud.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct Node {
    pub tier: Layer,
    pub provider: Provider,
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tier.token(self.provider))
    }
}

/// A weighted hot→cool or cool→archive hop: the destination tier's storage
/// cost plus the transfer cost of the route.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub from: Node,
    pub to: Node,
    pub storage: Cost,
    pub transfer: Cost,
    pub weight: Cost,
}

/// The hot→cool→archive graph of one planning request.
///
/// Rebuilt fresh every time: the weights depend on the request's data volume,
/// so there is nothing to cache.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StorageGraph {
    pub edges: Vec<Edge>,
}

impl StorageGraph {
    /// Assemble the graph from the per-provider tier costs and the month's
    /// data volume.
    pub fn build(
        providers: EnumSet<Provider>,
        costs: &BTreeMap<Provider, ProviderCosts>,
        volume: Gigabytes,
        card: &RateCard,
    ) -> Result<Self> {
        let providers: Vec<Provider> = providers.into_iter().collect();
        let hops = [
            (Layer::HotStorage, Layer::CoolStorage),
            (Layer::CoolStorage, Layer::ArchiveStorage),
        ];
        let mut edges = Vec::with_capacity(hops.len() * providers.len() * providers.len());
        for (from_tier, to_tier) in hops {
            for (from, to) in iproduct!(providers.iter().copied(), providers.iter().copied()) {
                let storage = costs
                    .get(&to)
                    .and_then(|costs| costs.get(to_tier))
                    .with_context(|| format!("missing {to_tier} costs for {to}"))?
                    .total;
                let transfer =
                    transfer_cost(Route::new(from_tier, from, to_tier, to), volume, card)?;
                edges.push(Edge {
                    from: Node { tier: from_tier, provider: from },
                    to: Node { tier: to_tier, provider: to },
                    storage,
                    transfer,
                    weight: storage + transfer,
                });
            }
        }
        Ok(Self { edges })
    }

    pub fn edge(&self, from: Node, to: Node) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.from == from && edge.to == to)
    }
}
