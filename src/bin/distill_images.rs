use anyhow::Result;
use clap::Parser;
use console::style;
use log::{info, warn};
use photo_gather::cli::DistillArgs;
use photo_gather::component::Distiller;
use photo_gather::config::Config;
use photo_gather::init;
use photo_gather::signal::setup_shutdown_signal;
use std::process::ExitCode;

fn main() -> ExitCode {
    init::init();
    let args = DistillArgs::parse();

    match run(args) {
        Ok(()) => {
            info!("distill_images exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("distill_images failed: {e:#}");
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: DistillArgs) -> Result<()> {
    let shutdown_signal = setup_shutdown_signal()?;
    let config = Config::new()?;

    Distiller::new(config, shutdown_signal).run(&args.into())?;
    Ok(())
}
