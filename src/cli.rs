use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::Workload;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Price the pipeline on every cloud and pick the cheapest provider split.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Print the active rate card.
    #[clap(name = "rates")]
    Rates(RatesArgs),
}

#[derive(Parser)]
pub struct PlanArgs {
    #[clap(flatten)]
    pub workload: WorkloadArgs,

    #[clap(flatten)]
    pub rate_card: RateCardArgs,

    /// Emit the serialized plan instead of rendered tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    pub rate_card: RateCardArgs,
}

#[derive(Parser)]
pub struct RateCardArgs {
    /// Path to a JSON rate card; the built-in card is used when omitted.
    #[clap(long = "rate-card", env = "RATE_CARD")]
    pub path: Option<PathBuf>,
}

#[derive(Parser)]
pub struct WorkloadArgs {
    /// Fleet size.
    #[clap(long, env = "DEVICES")]
    pub devices: u32,

    /// Minutes between two consecutive messages of one device.
    #[clap(
        long = "sending-interval-minutes",
        default_value = "5",
        env = "SENDING_INTERVAL_MINUTES"
    )]
    pub sending_interval_minutes: f64,

    /// Average message size in kilobytes.
    #[clap(long = "message-size-kb", default_value = "1", env = "MESSAGE_SIZE_KB")]
    pub message_size_kb: f64,

    /// Months of hot telemetry retention.
    #[clap(long = "hot-months", default_value = "1", env = "HOT_MONTHS")]
    pub hot_months: u32,

    /// Months of cool retention; includes the hot window.
    #[clap(long = "cool-months", default_value = "3", env = "COOL_MONTHS")]
    pub cool_months: u32,

    /// Months of archive retention; includes the cool window.
    #[clap(long = "archive-months", default_value = "12", env = "ARCHIVE_MONTHS")]
    pub archive_months: u32,

    /// Host a 3-D model of the twin.
    #[clap(long = "needs-3d-model", env = "NEEDS_3D_MODEL")]
    pub needs_3d_model: bool,

    /// Twin entity count; required with a 3-D model.
    #[clap(long = "entity-count", env = "ENTITY_COUNT")]
    pub entity_count: Option<u32>,

    /// Active dashboard editors.
    #[clap(long, default_value = "1", env = "EDITORS")]
    pub editors: u32,

    /// Active dashboard viewers.
    #[clap(long, default_value = "0", env = "VIEWERS")]
    pub viewers: u32,

    /// Dashboard refreshes per hour.
    #[clap(long = "dashboard-refreshes-per-hour", default_value = "4", env = "DASHBOARD_REFRESHES_PER_HOUR")]
    pub dashboard_refreshes_per_hour: u32,

    /// Hours per day the dashboards are watched.
    #[clap(long = "dashboard-active-hours-per-day", default_value = "8", env = "DASHBOARD_ACTIVE_HOURS_PER_DAY")]
    pub dashboard_active_hours_per_day: u32,

    /// Extra monthly workflow runs on the processing layer.
    #[clap(long = "orchestration-runs", env = "ORCHESTRATION_RUNS")]
    pub orchestration_runs: Option<u64>,

    /// Extra monthly change events ingested by the twin layer.
    #[clap(long = "twin-change-events", env = "TWIN_CHANGE_EVENTS")]
    pub twin_change_events: Option<u64>,
}

impl From<&WorkloadArgs> for Workload {
    fn from(args: &WorkloadArgs) -> Self {
        Self {
            devices: args.devices,
            sending_interval_minutes: args.sending_interval_minutes,
            message_size_kb: args.message_size_kb,
            hot_months: args.hot_months,
            cool_months: args.cool_months,
            archive_months: args.archive_months,
            needs_3d_model: args.needs_3d_model,
            entity_count: args.entity_count,
            editors: args.editors,
            viewers: args.viewers,
            dashboard_refreshes_per_hour: args.dashboard_refreshes_per_hour,
            dashboard_active_hours_per_day: args.dashboard_active_hours_per_day,
            orchestration_runs: args.orchestration_runs,
            twin_change_events: args.twin_change_events,
        }
    }
}
