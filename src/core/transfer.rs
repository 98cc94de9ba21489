//! Cross-cloud data movement pricing.

use std::fmt::{Display, Formatter};

use enumset::EnumSet;
use itertools::iproduct;
use serde::Serialize;

use crate::{
    core::layer::Layer,
    prelude::*,
    pricing::{Provider, RateCard},
    quantity::{cost::Cost, data::Gigabytes},
};

/// A directed transfer route between two pipeline endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub from_layer: Layer,
    pub from: Provider,
    pub to_layer: Layer,
    pub to: Provider,
}

impl Route {
    pub const fn new(from_layer: Layer, from: Provider, to_layer: Layer, to: Provider) -> Self {
        Self { from_layer, from, to_layer, to }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}",
            self.from_layer.token(self.from),
            self.to_layer.token(self.to),
        )
    }
}

/// Monthly cost of moving `volume` along the route.
///
/// Within one cloud the move is free, with one exception: tiering out of hot
/// storage can carry the destination provider's per-GB fee (Azure bills it
/// beyond a monthly exemption). Across clouds the *source* provider's egress
/// ladder applies.
pub fn transfer_cost(route: Route, volume: Gigabytes, card: &RateCard) -> Result<Cost> {
    if route.from == route.to {
        if route.from_layer == Layer::HotStorage && route.to_layer == Layer::CoolStorage {
            let cool = card
                .provider(route.to)?
                .cool_storage
                .as_ref()
                .with_context(|| format!("missing cool storage rates for {}", route.to))?;
            if let Some(ladder) = &cool.tiering_from_hot {
                return Ok(ladder.price(volume.0));
            }
        }
        return Ok(Cost::ZERO);
    }
    let egress = card
        .provider(route.from)?
        .egress
        .as_ref()
        .with_context(|| format!("missing egress rates for {}", route.from))?;
    Ok(egress.price(volume.0))
}

/// The 12 transfer routes of the fixed topology: the three data-bearing hops,
/// each in all four provider orderings.
pub fn topology_routes(providers: EnumSet<Provider>) -> Vec<Route> {
    let providers: Vec<Provider> = providers.into_iter().collect();
    let hops = [
        (Layer::Ingestion, Layer::Processing),
        (Layer::HotStorage, Layer::CoolStorage),
        (Layer::CoolStorage, Layer::ArchiveStorage),
    ];
    hops.into_iter()
        .flat_map(|(from_layer, to_layer)| {
            iproduct!(providers.iter().copied(), providers.iter().copied())
                .map(move |(from, to)| Route::new(from_layer, from, to_layer, to))
        })
        .collect()
}

/// One priced route, for the audit output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteCost {
    pub route: Route,
    pub volume: Gigabytes,
    pub cost: Cost,
}

/// Price every topology route at the month's data volume.
pub fn audit(
    providers: EnumSet<Provider>,
    volume: Gigabytes,
    card: &RateCard,
) -> Result<Vec<RouteCost>> {
    topology_routes(providers)
        .into_iter()
        .map(|route| Ok(RouteCost { route, volume, cost: transfer_cost(route, volume, card)? }))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_same_cloud_is_free() {
        let card = RateCard::builtin().unwrap();
        let route =
            Route::new(Layer::CoolStorage, Provider::Aws, Layer::ArchiveStorage, Provider::Aws);
        assert_eq!(transfer_cost(route, Gigabytes::from(5000.0), &card).unwrap(), Cost::ZERO);
    }

    #[test]
    fn test_azure_tiering_exemption() {
        let card = RateCard::builtin().unwrap();
        let route =
            Route::new(Layer::HotStorage, Provider::Azure, Layer::CoolStorage, Provider::Azure);
        // Within the monthly exemption:
        assert_eq!(transfer_cost(route, Gigabytes::from(4.0), &card).unwrap(), Cost::ZERO);
        // One gigabyte beyond it:
        assert_relative_eq!(
            transfer_cost(route, Gigabytes::from(6.0), &card).unwrap().0,
            0.01,
        );
    }

    #[test]
    fn test_cross_cloud_bills_source_egress() {
        let card = RateCard::builtin().unwrap();
        let from_aws =
            Route::new(Layer::HotStorage, Provider::Aws, Layer::CoolStorage, Provider::Azure);
        let from_azure =
            Route::new(Layer::HotStorage, Provider::Azure, Layer::CoolStorage, Provider::Aws);
        let volume = Gigabytes::from(1100.0);
        assert_relative_eq!(transfer_cost(from_aws, volume, &card).unwrap().0, 1000.0 * 0.09);
        assert_relative_eq!(transfer_cost(from_azure, volume, &card).unwrap().0, 1000.0 * 0.087);
    }

    #[test]
    fn test_free_allowance_boundary() {
        let card = RateCard::builtin().unwrap();
        let route =
            Route::new(Layer::Ingestion, Provider::Aws, Layer::Processing, Provider::Azure);
        assert_eq!(transfer_cost(route, Gigabytes::from(100.0), &card).unwrap(), Cost::ZERO);
        assert_relative_eq!(
            transfer_cost(route, Gigabytes::from(101.0), &card).unwrap().0,
            0.09,
        );
    }

    #[test]
    fn test_twelve_topology_routes() {
        let routes = topology_routes(Provider::Aws | Provider::Azure);
        assert_eq!(routes.len(), 12);
    }
}
