//! Per-layer pricing.
//!
//! One parameterized evaluator per layer, driven by the provider's section of
//! the rate card — the arithmetic is never duplicated per provider. All
//! evaluators are pure; the only coupling is the L1→L2→L3 volume chain, where
//! each stage prices the volume the previous stage handed over.

mod ingestion;
mod processing;
mod storage;
mod twin;
mod visualization;

use serde::Serialize;

use crate::{
    core::{
        layer::{Layer, LayerCost},
        workload::Workload,
    },
    prelude::*,
    pricing::{Provider, RateCard},
};

/// All per-layer results for one provider.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProviderCosts {
    pub ingestion: LayerCost,
    pub processing: LayerCost,
    pub hot: LayerCost,
    pub cool: LayerCost,
    pub archive: LayerCost,

    /// `None` when the provider has no twin-management offering.
    pub twin: Option<LayerCost>,

    /// `None` when the provider has no dashboard offering.
    pub visualization: Option<LayerCost>,
}

impl ProviderCosts {
    pub fn get(&self, layer: Layer) -> Option<&LayerCost> {
        match layer {
            Layer::Ingestion => Some(&self.ingestion),
            Layer::Processing => Some(&self.processing),
            Layer::HotStorage => Some(&self.hot),
            Layer::CoolStorage => Some(&self.cool),
            Layer::ArchiveStorage => Some(&self.archive),
            Layer::TwinManagement => self.twin.as_ref(),
            Layer::Visualization => self.visualization.as_ref(),
        }
    }
}

/// Evaluate every layer for one provider.
#[instrument(skip_all, fields(provider = %provider))]
pub fn evaluate(provider: Provider, workload: &Workload, card: &RateCard) -> Result<ProviderCosts> {
    let rates = card.provider(provider)?;
    let (ingestion, ingested) = ingestion::evaluate(provider, rates, workload)?;
    let (processing, processed) = processing::evaluate(provider, rates, workload, ingested)?;
    let (hot, hot_outflow) = storage::hot(provider, rates, workload, processed)?;
    let (cool, cool_outflow) = storage::cool(provider, rates, workload, hot_outflow)?;
    let archive = storage::archive(provider, rates, workload, cool_outflow)?;
    Ok(ProviderCosts {
        ingestion,
        processing,
        hot,
        cool,
        archive,
        twin: twin::evaluate(provider, rates, workload),
        visualization: visualization::evaluate(provider, rates, workload),
    })
}

/// Unit count in millions, the resolution most rates are quoted at.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn per_million(count: u64) -> f64 {
    count as f64 / 1_000_000.0
}
