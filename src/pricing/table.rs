//! The rate card: every list price the evaluators may reference.
//!
//! Loaded once per process and handed down by reference — never stored in
//! module state, so concurrent calculations can share one card freely.

use std::{collections::BTreeMap, fs, path::Path};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    pricing::{Provider, RateLadder},
    quantity::{cost::Cost, rate::GigabyteMonthRate},
};

/// Nested provider → service rate table.
///
/// Sections are optional at the type level: a provider that lacks a section
/// either does not offer that layer (twin management, visualization — the
/// planner excludes it from the comparison) or ships an incomplete card (any
/// other section — the evaluator that needs it fails loudly).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RateCard(BTreeMap<Provider, ProviderRates>);

impl RateCard {
    /// The rate card compiled into the binary.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(include_str!("rates.json"))
            .context("failed to parse the built-in rate card")
    }

    /// Read a card from the given JSON file, or fall back to the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("failed to read the rate card from `{}`", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("failed to parse the rate card from `{}`", path.display()))
            }
            None => Self::builtin(),
        }
    }

    /// Providers present on the card, in tie-break order.
    pub fn providers(&self) -> EnumSet<Provider> {
        self.0.keys().copied().collect()
    }

    pub fn provider(&self, provider: Provider) -> Result<&ProviderRates> {
        self.0
            .get(&provider)
            .with_context(|| format!("the rate card has no entry for {provider}"))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRates {
    pub ingestion: Option<IngestionRates>,
    pub functions: Option<FunctionRates>,
    pub hot_storage: Option<HotStorageRates>,
    pub cool_storage: Option<CoolStorageRates>,
    pub archive_storage: Option<ArchiveStorageRates>,
    pub twin: Option<TwinRates>,
    pub visualization: Option<VisualizationRates>,

    /// Internet egress ladder, in gigabytes. Billed by the *source* cloud of a
    /// cross-cloud route.
    pub egress: Option<RateLadder>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionRates {
    /// Per million device connection-minutes.
    pub connectivity_per_million_minutes: Cost,

    /// Ladder over millions of ingested messages.
    pub messaging: RateLadder,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRates {
    pub per_million_invocations: Cost,
    pub per_gb_second: Cost,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotStorageRates {
    pub per_gb_month: GigabyteMonthRate,
    pub writes_per_million: Cost,
    pub reads_per_million: Cost,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolStorageRates {
    pub per_gb_month: GigabyteMonthRate,

    /// Same-cloud hot→cool tiering fee, per gigabyte moved, when the provider
    /// bills one (Azure exempts the first 5 GB each month).
    pub tiering_from_hot: Option<RateLadder>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStorageRates {
    pub per_gb_month: GigabyteMonthRate,

    /// Shortest retention the provider bills for, in months.
    pub minimum_billable_months: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinRates {
    pub per_entity_month: Cost,
    pub messages_per_million: Cost,
    pub queries_per_million: Cost,

    /// 3-D model hosting per entity-month; absent when the provider prices the
    /// modeled and non-modeled twin identically.
    pub model_hosting_per_entity_month: Option<Cost>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationRates {
    pub per_editor_month: Cost,
    pub per_viewer_month: Cost,

    /// Flat monthly workspace fee, independent of the user count.
    pub workspace_month: Cost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_card_parses() {
        let card = RateCard::builtin().unwrap();
        assert_eq!(card.providers().len(), 2);
    }

    #[test]
    fn test_builtin_card_is_complete() {
        let card = RateCard::builtin().unwrap();
        for provider in card.providers() {
            let rates = card.provider(provider).unwrap();
            assert!(rates.ingestion.is_some(), "{provider} lacks ingestion rates");
            assert!(rates.functions.is_some(), "{provider} lacks function rates");
            assert!(rates.hot_storage.is_some(), "{provider} lacks hot storage rates");
            assert!(rates.cool_storage.is_some(), "{provider} lacks cool storage rates");
            assert!(rates.archive_storage.is_some(), "{provider} lacks archive storage rates");
            assert!(rates.egress.is_some(), "{provider} lacks egress rates");
        }
    }

    #[test]
    fn test_missing_provider_is_contextual() {
        let card: RateCard = serde_json::from_str(r#"{}"#).unwrap();
        let error = card.provider(Provider::Aws).unwrap_err();
        assert!(error.to_string().contains("AWS"));
    }
}
