use std::collections::BTreeMap;

use crate::{
    core::{evaluator::per_million, layer::LayerCost, workload::Workload},
    prelude::*,
    pricing::{Provider, ProviderRates},
    quantity::data::Gigabytes,
};

/// L1: connectivity plus the tiered message ladder.
pub fn evaluate(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
) -> Result<(LayerCost, Gigabytes)> {
    let rates = rates
        .ingestion
        .as_ref()
        .with_context(|| format!("missing ingestion rates for {provider}"))?;

    let connectivity = rates.connectivity_per_million_minutes
        * (workload.connection_minutes_per_month() / 1_000_000.0);
    let messaging = rates.messaging.price(per_million(workload.messages_per_month()));

    let volume = workload.ingested_gb();
    let cost = LayerCost::new(
        BTreeMap::from([("connectivity", connectivity), ("messaging", messaging)]),
        Some(volume),
    );
    trace!(%provider, total = %cost.total, "ingestion priced");
    Ok((cost, volume))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::pricing::RateCard;

    #[test]
    fn test_aws_ingestion() {
        let card = RateCard::builtin().unwrap();
        let workload = Workload::builder()
            .devices(1000)
            .sending_interval_minutes(5.0)
            .message_size_kb(1.0)
            .hot_months(1)
            .cool_months(3)
            .archive_months(12)
            .build();
        let (cost, volume) =
            evaluate(Provider::Aws, card.provider(Provider::Aws).unwrap(), &workload).unwrap();
        // 43.2M connection-minutes at $0.08/M and 8.64M messages at $1/M:
        assert_relative_eq!(cost.components["connectivity"].0, 3.456);
        assert_relative_eq!(cost.components["messaging"].0, 8.64);
        assert_relative_eq!(volume.0, 8.64);
    }
}
