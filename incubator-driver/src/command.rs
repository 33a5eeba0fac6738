//! Control and configuration messages for the tick task

use std::path::PathBuf;

use incubator_core::{Channel, Command, ConfigResult, ExportOutcome, ExportResult, SimulationConfig};
use tokio::sync::oneshot;

/// Message sent from a [`DriverHandle`](crate::DriverHandle) to the tick task
#[derive(Debug)]
pub enum ControlCommand {
    /// Enter `Running`
    Start,
    /// Enter `Stopped`
    Stop,
    /// Flip the alarm pause flag
    ToggleAlarmPause,
    /// Empty the export log
    ClearLog,
    /// Replace one threshold
    SetThreshold {
        /// Channel to update
        channel: Channel,
        /// New lower bound
        min: f64,
        /// New upper bound
        max: f64,
        /// Validation result
        reply: oneshot::Sender<ConfigResult<()>>,
    },
    /// Replace the whole configuration
    UpdateConfig {
        /// New configuration
        config: SimulationConfig,
        /// Validation result
        reply: oneshot::Sender<ConfigResult<()>>,
    },
    /// Write the export log into a directory
    Export {
        /// Target directory
        dir: PathBuf,
        /// Export result
        reply: oneshot::Sender<ExportResult<ExportOutcome>>,
    },
}

impl From<Command> for ControlCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Start => ControlCommand::Start,
            Command::Stop => ControlCommand::Stop,
            Command::ToggleAlarmPause => ControlCommand::ToggleAlarmPause,
            Command::ClearLog => ControlCommand::ClearLog,
        }
    }
}
