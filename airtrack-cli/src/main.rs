use airtrack_core::config::Config;
use airtrack_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use airtrack_core::Tracker;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod output;

use commands::Command;
use output::Output;

#[derive(Parser, Debug)]
#[command(name = "airtrack")]
#[command(author, version, about = "Track crypto airdrops, testnets, tools and videos", long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted data (overrides config and env)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print command results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

/// Defaults, then config file, then `AIRTRACK_*` env, then flags
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            let mut config = Config::default();
            if let Some(dir) = dirs::data_local_dir() {
                config.store.data_dir = dir.join("airtrack");
            }
            config
        }
    };

    config.apply_env()?;

    if let Some(dir) = &args.data_dir {
        config.store.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.parse().unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', using 'info'", level);
            LogLevel::Info
        });
    }
    config.logging.json_format |= args.json_logs;

    let expanded = shellexpand::tilde(&config.store.data_dir.to_string_lossy()).into_owned();
    config.store.data_dir = PathBuf::from(expanded);

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = resolve_config(&args)?;
    config.validate()?;

    // Initialize logging
    init_logging_with_config(LogConfig::from_settings(&config.logging))?;

    debug!(data_dir = %config.store.data_dir.display(), "AirTrack CLI started");

    let out = Output::new(args.json);
    // `daily-check` runs the check itself and reports the outcome
    let mut tracker = if matches!(args.command, Command::DailyCheck { .. }) {
        Tracker::open_without_daily_check(config)?
    } else {
        Tracker::open(config)?
    };
    commands::run(&mut tracker, args.command, &out).await?;

    debug!("AirTrack CLI finished");

    Ok(())
}
