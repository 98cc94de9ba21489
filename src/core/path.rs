use enumset::EnumSet;
use itertools::iproduct;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    core::{
        graph::{Node, StorageGraph},
        layer::Layer,
    },
    prelude::*,
    pricing::Provider,
    quantity::cost::Cost,
};

/// The chosen hot→cool→archive route. One joint decision fixes all three tier
/// providers at once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoragePath {
    pub hot: Node,
    pub cool: Node,
    pub archive: Node,

    /// Weight of the hot→cool edge.
    pub hot_to_cool: Cost,

    /// Weight of the cool→archive edge.
    pub cool_to_archive: Cost,

    /// Sum of the two traversed edge weights.
    pub weight: Cost,
}

/// Find the minimum-weight hot→cool→archive path by exhausting every provider
/// triple — the graph is a fixed three-rank DAG, so full enumeration is exact
/// and equivalent to a shortest-path search over it.
///
/// Ties break deterministically: lowest weight, then hot, cool and archive
/// provider order.
#[instrument(skip_all)]
pub fn cheapest_path(providers: EnumSet<Provider>, graph: &StorageGraph) -> Result<StoragePath> {
    let providers: Vec<Provider> = providers.into_iter().collect();
    let paths: Vec<StoragePath> = iproduct!(
        providers.iter().copied(),
        providers.iter().copied(),
        providers.iter().copied()
    )
        .map(|(hot, cool, archive)| {
            let hot = Node { tier: Layer::HotStorage, provider: hot };
            let cool = Node { tier: Layer::CoolStorage, provider: cool };
            let archive = Node { tier: Layer::ArchiveStorage, provider: archive };
            let first = graph
                .edge(hot, cool)
                .with_context(|| format!("the storage graph has no edge {hot} → {cool}"))?;
            let second = graph
                .edge(cool, archive)
                .with_context(|| format!("the storage graph has no edge {cool} → {archive}"))?;
            Ok(StoragePath {
                hot,
                cool,
                archive,
                hot_to_cool: first.weight,
                cool_to_archive: second.weight,
                weight: first.weight + second.weight,
            })
        })
        .collect::<Result<_>>()?;
    let cheapest = paths
        .into_iter()
        .min_by_key(|path| {
            (
                OrderedFloat(path.weight.0),
                path.hot.provider,
                path.cool.provider,
                path.archive.provider,
            )
        })
        .context("the storage graph has no complete path")?;
    debug!(
        hot = %cheapest.hot,
        cool = %cheapest.cool,
        archive = %cheapest.archive,
        weight = %cheapest.weight,
        "storage path chosen",
    );
    Ok(cheapest)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::{evaluator, workload::Workload},
        pricing::RateCard,
        quantity::data::Gigabytes,
    };

    fn solve(workload: &Workload, card: &RateCard) -> (StoragePath, StorageGraph) {
        let mut costs = BTreeMap::new();
        for provider in card.providers() {
            costs.insert(provider, evaluator::evaluate(provider, workload, card).unwrap());
        }
        let graph =
            StorageGraph::build(card.providers(), &costs, workload.ingested_gb(), card).unwrap();
        let path = cheapest_path(card.providers(), &graph).unwrap();
        (path, graph)
    }

    fn workload(devices: u32, message_size_kb: f64) -> Workload {
        Workload::builder()
            .devices(devices)
            .sending_interval_minutes(5.0)
            .message_size_kb(message_size_kb)
            .hot_months(1)
            .cool_months(3)
            .archive_months(12)
            .build()
    }

    /// One node per tier, and the weight is exactly the two traversed edges.
    #[test]
    fn test_path_is_valid() {
        let card = RateCard::builtin().unwrap();
        let (path, graph) = solve(&workload(1000, 1.0), &card);
        assert_eq!(path.hot.tier, Layer::HotStorage);
        assert_eq!(path.cool.tier, Layer::CoolStorage);
        assert_eq!(path.archive.tier, Layer::ArchiveStorage);
        let first = graph.edge(path.hot, path.cool).unwrap();
        let second = graph.edge(path.cool, path.archive).unwrap();
        assert_relative_eq!(path.weight.0, (first.weight + second.weight).0);
    }

    /// Below the egress allowances every cross-cloud hop is free, Azure's cool
    /// and archive tiers are cheapest, and hot lands on AWS because leaving an
    /// Azure hot tier would pay the same-cloud tiering fee.
    #[test]
    fn test_small_fleet_splits_across_clouds() {
        let card = RateCard::builtin().unwrap();
        let (path, _) = solve(&workload(1000, 1.0), &card);
        assert_eq!(path.hot.provider, Provider::Aws);
        assert_eq!(path.cool.provider, Provider::Azure);
        assert_eq!(path.archive.provider, Provider::Azure);
    }

    /// At heavy volume the egress bill dwarfs the per-tier savings and the
    /// whole chain collapses onto one cloud.
    #[test]
    fn test_heavy_volume_stays_on_one_cloud() {
        let card = RateCard::builtin().unwrap();
        let (path, _) = solve(&workload(100_000, 10.0), &card);
        assert_eq!(path.hot.provider, path.cool.provider);
        assert_eq!(path.cool.provider, path.archive.provider);
    }

    /// Equal weights resolve by provider order, never by map iteration order.
    #[test]
    fn test_tie_breaks_by_provider_order() {
        let mut json: serde_json::Value =
            serde_json::from_str(include_str!("../pricing/rates.json")).unwrap();
        // Make the clouds indistinguishable — every triple now ties:
        json["azure"] = json["aws"].clone();
        let card: RateCard = serde_json::from_value(json).unwrap();
        let workload = workload(1000, 1.0);
        let mut costs = BTreeMap::new();
        for provider in card.providers() {
            costs.insert(provider, evaluator::evaluate(provider, &workload, &card).unwrap());
        }
        let graph =
            StorageGraph::build(card.providers(), &costs, Gigabytes::from(8.64), &card).unwrap();
        let path = cheapest_path(card.providers(), &graph).unwrap();
        assert_eq!(path.hot.provider, Provider::Aws);
        assert_eq!(path.cool.provider, Provider::Aws);
        assert_eq!(path.archive.provider, Provider::Aws);
    }
}
