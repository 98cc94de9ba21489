mod provider;
mod table;
mod tier;

pub use self::{
    provider::Provider,
    table::{
        ArchiveStorageRates,
        CoolStorageRates,
        FunctionRates,
        HotStorageRates,
        IngestionRates,
        ProviderRates,
        RateCard,
        TwinRates,
        VisualizationRates,
    },
    tier::{RateLadder, RateTier},
};
