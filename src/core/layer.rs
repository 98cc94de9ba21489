use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    pricing::Provider,
    quantity::{cost::Cost, data::Gigabytes},
};

/// Pipeline layers, in data-flow order.
#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, derive_more::Display,
)]
pub enum Layer {
    /// L1: device connectivity and message intake.
    #[display("L1")]
    Ingestion,

    /// L2: dispatch, transformation and persistence functions.
    #[display("L2")]
    Processing,

    /// L3, hot tier: live telemetry the twin and dashboards read.
    #[display("L3_hot")]
    HotStorage,

    /// L3, cool tier.
    #[display("L3_cool")]
    CoolStorage,

    /// L3, archive tier.
    #[display("L3_archive")]
    ArchiveStorage,

    /// L4: the digital-twin graph itself.
    #[display("L4")]
    TwinManagement,

    /// L5: dashboards.
    #[display("L5")]
    Visualization,
}

impl Layer {
    pub const ALL: [Self; 7] = [
        Self::Ingestion,
        Self::Processing,
        Self::HotStorage,
        Self::CoolStorage,
        Self::ArchiveStorage,
        Self::TwinManagement,
        Self::Visualization,
    ];

    /// Path token, e.g. `L3_hot_AWS`.
    pub fn token(self, provider: Provider) -> String {
        format!("{self}_{provider}")
    }
}

/// Monthly cost of one (layer, provider) pair.
///
/// Produced once per evaluation and never mutated — later stages combine
/// results, they do not edit them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerCost {
    pub total: Cost,

    /// Stable-keyed component breakdown.
    pub components: BTreeMap<&'static str, Cost>,

    /// Data volume this layer hands to the next stage, when it persists any.
    pub volume: Option<Gigabytes>,
}

impl LayerCost {
    pub fn new(components: BTreeMap<&'static str, Cost>, volume: Option<Gigabytes>) -> Self {
        let total = components.values().copied().sum();
        Self { total, components, volume }
    }
}
