use bon::Builder;
use serde::Serialize;

use crate::{prelude::*, quantity::data::Gigabytes};

/// Minutes in a 30-day billing month.
pub const MINUTES_PER_MONTH: f64 = 1440.0 * 30.0;

/// One planning request's parameters. Immutable once built; [`Workload::validate`]
/// runs before any pricing.
#[derive(Builder, Clone, Debug, PartialEq, Serialize)]
pub struct Workload {
    /// Fleet size.
    pub devices: u32,

    /// Minutes between two consecutive messages of one device.
    pub sending_interval_minutes: f64,

    /// Average message size in kilobytes.
    pub message_size_kb: f64,

    /// Hot telemetry retention.
    pub hot_months: u32,

    /// Cool retention; includes the hot window.
    pub cool_months: u32,

    /// Archive retention; includes the cool window.
    pub archive_months: u32,

    /// Host a 3-D model of the twin.
    #[builder(default)]
    pub needs_3d_model: bool,

    /// Twin entity count; required with a 3-D model.
    pub entity_count: Option<u32>,

    #[builder(default)]
    pub editors: u32,

    #[builder(default)]
    pub viewers: u32,

    #[builder(default)]
    pub dashboard_refreshes_per_hour: u32,

    #[builder(default)]
    pub dashboard_active_hours_per_day: u32,

    /// Extra monthly workflow runs on the processing layer.
    pub orchestration_runs: Option<u64>,

    /// Extra monthly change events ingested by the twin layer.
    pub twin_change_events: Option<u64>,
}

impl Workload {
    pub fn validate(&self) -> Result {
        ensure!(self.devices > 0, "the number of devices must be positive");
        ensure!(self.sending_interval_minutes > 0.0, "the sending interval must be positive");
        ensure!(self.message_size_kb > 0.0, "the average message size must be positive");
        ensure!(
            self.hot_months <= self.cool_months,
            "hot retention ({} mo) must not exceed cool retention ({} mo)",
            self.hot_months,
            self.cool_months,
        );
        ensure!(
            self.cool_months <= self.archive_months,
            "cool retention ({} mo) must not exceed archive retention ({} mo)",
            self.cool_months,
            self.archive_months,
        );
        if self.needs_3d_model {
            ensure!(
                self.entity_count.is_some(),
                "the entity count is required when a 3-D model is requested",
            );
        }
        Ok(())
    }

    /// Messages the fleet sends per month, rounded *up* — never under-provision.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    pub fn messages_per_month(&self) -> u64 {
        (f64::from(self.devices) * (MINUTES_PER_MONTH / self.sending_interval_minutes)).ceil()
            as u64
    }

    /// Data the fleet produces per month.
    #[expect(clippy::cast_precision_loss)]
    pub fn ingested_gb(&self) -> Gigabytes {
        Gigabytes::from(self.messages_per_month() as f64 * self.message_size_kb / 1_000_000.0)
    }

    /// Device connection-minutes per month.
    pub fn connection_minutes_per_month(&self) -> f64 {
        f64::from(self.devices) * MINUTES_PER_MONTH
    }

    /// Dashboard-driven queries per month.
    pub fn dashboard_queries_per_month(&self) -> u64 {
        u64::from(self.dashboard_refreshes_per_hour)
            * u64::from(self.dashboard_active_hours_per_day)
            * 30
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn workload() -> Workload {
        Workload::builder()
            .devices(1000)
            .sending_interval_minutes(5.0)
            .message_size_kb(1.0)
            .hot_months(1)
            .cool_months(3)
            .archive_months(12)
            .editors(2)
            .viewers(5)
            .dashboard_refreshes_per_hour(4)
            .dashboard_active_hours_per_day(8)
            .build()
    }

    #[test]
    fn test_valid() {
        workload().validate().unwrap();
    }

    #[test]
    fn test_zero_devices_rejected() {
        let mut workload = workload();
        workload.devices = 0;
        assert!(workload.validate().unwrap_err().to_string().contains("devices"));
    }

    #[test]
    fn test_hot_longer_than_cool_rejected() {
        let mut workload = workload();
        workload.hot_months = 4;
        assert!(workload.validate().is_err());
    }

    #[test]
    fn test_cool_longer_than_archive_rejected() {
        let mut workload = workload();
        workload.cool_months = 13;
        assert!(workload.validate().is_err());
    }

    #[test]
    fn test_3d_model_requires_entity_count() {
        let mut workload = workload();
        workload.needs_3d_model = true;
        assert!(workload.validate().is_err());
        workload.entity_count = Some(10);
        workload.validate().unwrap();
    }

    #[test]
    fn test_messages_round_up() {
        let mut workload = workload();
        workload.devices = 1;
        workload.sending_interval_minutes = 7.0;
        // 43 200 / 7 = 6171.43…, billed as 6172:
        assert_eq!(workload.messages_per_month(), 6172);
    }

    #[test]
    fn test_ingested_volume() {
        // 8 640 000 one-kilobyte messages:
        assert_relative_eq!(workload().ingested_gb().0, 8.64);
    }
}
