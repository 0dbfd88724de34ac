use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;
use log::{info, warn};
use photo_gather::cli::GatherArgs;
use photo_gather::component::Gatherer;
use photo_gather::component::gatherer::DateRange;
use photo_gather::config::{Config, ConfigError, EXAMPLE_CONFIG, GatherConfig};
use photo_gather::init;
use photo_gather::signal::setup_shutdown_signal;
use std::process::ExitCode;

fn main() -> ExitCode {
    init::init();
    let args = GatherArgs::parse();

    match run(&args) {
        Ok(()) => {
            info!("gather_images exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("gather_images failed: {e:#}");
            eprintln!("{} {e:#}", style("Error:").red().bold());
            if matches!(e.downcast_ref::<ConfigError>(), Some(ConfigError::NotFound(_))) {
                eprintln!("Please create a config file with the following structure:\n");
                eprintln!("{EXAMPLE_CONFIG}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &GatherArgs) -> Result<()> {
    let to_date = args.to_date_or_yesterday(Local::now().date_naive());
    let range = DateRange::new(args.from_date, to_date)?;
    let gather_config = GatherConfig::load(&args.config)?;

    let shutdown_signal = setup_shutdown_signal()?;
    let config = Config::new()?;

    Gatherer::new(config, gather_config, shutdown_signal).run(range)?;
    Ok(())
}
