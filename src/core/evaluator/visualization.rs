use std::collections::BTreeMap;

use crate::{
    core::{layer::LayerCost, workload::Workload},
    prelude::*,
    pricing::{Provider, ProviderRates},
};

/// L5: linear per-seat pricing plus whatever flat workspace fee the provider
/// charges. Returns `None` when the provider has no dashboard offering.
pub fn evaluate(
    provider: Provider,
    rates: &ProviderRates,
    workload: &Workload,
) -> Option<LayerCost> {
    let Some(rates) = rates.visualization.as_ref() else {
        debug!(%provider, "no dashboard offering, excluded");
        return None;
    };

    let cost = LayerCost::new(
        BTreeMap::from([
            ("editors", rates.per_editor_month * f64::from(workload.editors)),
            ("viewers", rates.per_viewer_month * f64::from(workload.viewers)),
            ("workspace", rates.workspace_month),
        ]),
        None,
    );
    trace!(%provider, total = %cost.total, "visualization priced");
    Some(cost)
}
