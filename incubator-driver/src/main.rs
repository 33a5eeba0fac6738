use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use incubator_core::{ExportOutcome, ReadingGenerator, SimulationConfig, SimulationSession};
use incubator_driver::{spawn, ChannelSink};
use log::info;

#[derive(Parser, Debug)]
#[command(
    name = "incubator-sim",
    version,
    about = "Headless incubator dashboard simulation with CSV export"
)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum number of readings to produce; the export may hold a few more
    /// if the driver ticks again before it is stopped
    #[arg(long, default_value_t = 50)]
    ticks: usize,

    /// Tick interval in milliseconds (50-1000)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// RNG seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Disable measurement noise
    #[arg(long)]
    no_noise: bool,

    /// Manual temperature override
    #[arg(long)]
    manual_temp: Option<f64>,

    /// Manual humidity override
    #[arg(long)]
    manual_humid: Option<f64>,

    /// Start with alarms paused
    #[arg(long)]
    pause_alarms: bool,

    /// Directory for the CSV export
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_path(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if self.no_noise {
            config.noise_enabled = false;
        }
        if let Some(temp) = self.manual_temp {
            config.manual_temp = temp;
        }
        if let Some(humid) = self.manual_humid {
            config.manual_humid = humid;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.simulation_config()?;

    let generator = match args.seed {
        Some(seed) => ReadingGenerator::seeded(seed),
        None => ReadingGenerator::from_entropy(),
    };
    let mut session = SimulationSession::with_generator(config, generator)?;
    if args.pause_alarms {
        session.toggle_alarm_pause();
    }

    let (sink, mut frames) = ChannelSink::bounded(args.ticks.max(1));
    let handle = spawn(session, sink);
    handle.start().await?;

    let mut received = 0;
    while received < args.ticks {
        let Some(frame) = frames.recv().await else {
            break;
        };
        received += 1;
        info!("[{:>4}] {}", received, frame.status_line());
    }
    handle.stop().await?;

    match handle.export(args.export_dir.clone()).await? {
        ExportOutcome::Written { path, rows } => println!("{rows} readings written to {}", path.display()),
        ExportOutcome::NoData => println!("No data to save yet."),
    }

    let session = handle.shutdown().await?;
    info!("Finished after {:.1} simulated seconds", session.sim_time());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn ticks_help_states_minimum() {
        let command = Args::command();
        let ticks = command
            .get_arguments()
            .find(|arg| arg.get_id() == "ticks")
            .unwrap();
        let help = ticks.get_help().unwrap().to_string();
        assert!(help.starts_with("Minimum number of readings"));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "incubator-sim",
            "--interval-ms",
            "500",
            "--no-noise",
            "--manual-temp",
            "38.004",
        ]);
        let config = args.simulation_config().unwrap();
        assert_eq!(config.interval_ms, 500);
        assert!(!config.noise_enabled);
        assert_eq!(config.overrides().temp, Some(38.004));
    }

    #[test]
    fn out_of_range_interval_is_rejected() {
        let args = Args::parse_from(["incubator-sim", "--interval-ms", "5"]);
        assert!(args.simulation_config().is_err());
    }
}
