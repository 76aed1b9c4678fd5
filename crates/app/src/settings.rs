//! Settings for the `tripsplit` binary.
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file
//! (`config/tripsplit.toml` unless `--config` says otherwise), `TRIPSPLIT_*`
//! environment variables, then command-line flags.
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tripsplit.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing` level for the binary and the engine.
    pub level: String,
    /// Currency code used when a snapshot does not name one.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: "INR".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tripsplit", about = "Balances and settle-up plan for a trip snapshot")]
pub struct Args {
    /// Trip snapshot (JSON) to read.
    pub snapshot: PathBuf,
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override log level (e.g. `debug`).
    #[arg(long)]
    pub level: Option<String>,
    /// Override fallback currency code.
    #[arg(long)]
    pub currency: Option<String>,
}

pub fn load(args: &Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TRIPSPLIT"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = &args.level {
        settings.level = level.clone();
    }
    if let Some(currency) = &args.currency {
        settings.currency = currency.clone();
    }

    Ok(settings)
}
