use std::collections::BTreeMap;

use crate::{
    core::{evaluator::per_million, layer::LayerCost, workload::Workload},
    prelude::*,
    pricing::{Provider, ProviderRates},
};

/// L4: entity graph, ingested telemetry and dashboard queries.
///
/// Returns `None` when the provider has no twin-management offering — the
/// selector then excludes it from this layer's comparison.
pub fn evaluate(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
) -> Option<LayerCost> {
    let Some(rates) = rates.twin.as_ref() else {
        debug!(%provider, "no twin-management offering, excluded");
        return None;
    };

    let entities = f64::from(workload.entity_count.unwrap_or(0));
    let messages =
        workload.messages_per_month() + workload.twin_change_events.unwrap_or_default();

    let mut components = BTreeMap::from([
        ("entities", rates.per_entity_month * entities),
        ("messages", rates.messages_per_million * per_million(messages)),
        (
            "queries",
            rates.queries_per_million * per_million(workload.dashboard_queries_per_month()),
        ),
    ]);
    // TODO: confirm whether the entity charge should be gated on the 3-D flag;
    // providers without a model-hosting rate currently price both branches
    // identically.
    if workload.needs_3d_model {
        if let Some(hosting) = rates.model_hosting_per_entity_month {
            components.insert("model-hosting", hosting * entities);
        }
    }

    let cost = LayerCost::new(components, None);
    trace!(%provider, total = %cost.total, "twin management priced");
    Some(cost)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::pricing::RateCard;

    fn workload(needs_3d_model: bool) -> Workload {
        Workload::builder()
            .devices(1000)
            .sending_interval_minutes(5.0)
            .message_size_kb(1.0)
            .hot_months(1)
            .cool_months(3)
            .archive_months(12)
            .needs_3d_model(needs_3d_model)
            .entity_count(50)
            .dashboard_refreshes_per_hour(4)
            .dashboard_active_hours_per_day(8)
            .build()
    }

    /// The flag changes nothing for a provider without a model-hosting rate.
    #[test]
    fn test_aws_prices_both_branches_identically() {
        let card = RateCard::builtin().unwrap();
        let rates = card.provider(Provider::Aws).unwrap();
        let flat = evaluate(Provider::Aws, rates, &workload(false)).unwrap();
        let modeled = evaluate(Provider::Aws, rates, &workload(true)).unwrap();
        assert_eq!(flat, modeled);
    }

    #[test]
    fn test_azure_branches_on_the_flag() {
        let card = RateCard::builtin().unwrap();
        let rates = card.provider(Provider::Azure).unwrap();
        let flat = evaluate(Provider::Azure, rates, &workload(false)).unwrap();
        let modeled = evaluate(Provider::Azure, rates, &workload(true)).unwrap();
        assert!(!flat.components.contains_key("model-hosting"));
        assert_relative_eq!(modeled.components["model-hosting"].0, 50.0 * 0.21);
        assert!(modeled.total > flat.total);
    }

    #[test]
    fn test_change_events_add_to_messages() {
        let card = RateCard::builtin().unwrap();
        let rates = card.provider(Provider::Aws).unwrap();
        let mut workload = workload(false);
        let base = evaluate(Provider::Aws, rates, &workload).unwrap();
        workload.twin_change_events = Some(1_000_000);
        let bumped = evaluate(Provider::Aws, rates, &workload).unwrap();
        assert_relative_eq!(
            (bumped.components["messages"] - base.components["messages"]).0,
            1.0,
            epsilon = 1e-9,
        );
    }
}
