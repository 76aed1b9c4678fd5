use clap::Parser;
use engine::Currency;

use crate::{error::Result, settings::Args, snapshot::TripSnapshot};

mod error;
mod report;
mod settings;
mod snapshot;

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tripsplit={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let fallback = Currency::try_from(settings.currency.as_str())?;
    tracing::info!("Loading trip snapshot {}", args.snapshot.display());
    let trip = TripSnapshot::read(&args.snapshot)?.into_trip(fallback)?;
    tracing::debug!(
        members = trip.members().len(),
        expenses = trip.expenses().len(),
        "trip loaded"
    );

    print!("{}", report::render(&trip));
    Ok(())
}
