//! Business day simulator runner
//!
//! Drives the emulation controller on a fixed wall-clock interval and
//! prints one JSON dashboard frame per tick.

use anyhow::Context;
use business_day_sim_core_rs::{Controller, EngineConfig, SystemClock};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "business-day-sim", about = "Emulate a settlement business day")]
struct Args {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the tick interval in seconds
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Pretty-print frames
    #[arg(long)]
    pretty: bool,
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json_str(&json)?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    if let Some(secs) = args.interval_secs {
        config.tick_interval_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

fn print_frame(controller: &Controller, pretty: bool) -> anyhow::Result<()> {
    let frame = controller.frame();
    let json = if pretty {
        frame.to_json_pretty()?
    } else {
        frame.to_json()?
    };
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let period = Duration::from_secs(config.tick_interval_secs);

    let mut controller = Controller::new(config, Box::new(SystemClock::new()))?;
    print_frame(&controller, args.pretty)?;

    let mut interval = tokio::time::interval(period);
    // First tick of a tokio interval completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Stopped controllers schedule nothing further
                let Some(report) = controller.tick() else {
                    log::info!("Controller stopped, exiting");
                    break;
                };
                print_frame(&controller, args.pretty)?;

                if args.ticks.is_some_and(|limit| report.tick >= limit) {
                    log::info!("Reached {} ticks", report.tick);
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                controller.toggle();
                log::info!("Interrupted after {} ticks", controller.ticks());
                break;
            }
        }
    }

    Ok(())
}
