mod cli;
mod core;
mod prelude;
mod pricing;
mod quantity;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command},
    core::{Workload, plan},
    pricing::RateCard,
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match Args::parse().command {
        Command::Plan(args) => {
            let card = RateCard::load(args.rate_card.path.as_deref())?;
            let workload = Workload::from(&args.workload);
            let plan = plan(&workload, &card)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", render::breakdown_table(&plan));
                println!("{}", render::pipeline_table(&plan));
                for override_ in &plan.overrides {
                    println!("{}", render::override_table(override_));
                }
                println!("{}", render::transfer_table(&plan));
                info!(
                    total = %plan.total,
                    path = %plan.cheapest_path.join(" → "),
                    "cheapest split",
                );
            }
            Ok(())
        }

        Command::Rates(args) => {
            let card = RateCard::load(args.rate_card.path.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&card)?);
            Ok(())
        }
    }
}
