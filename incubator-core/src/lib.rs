//! Simulation core for the incubator monitoring dashboard
//!
//! Generates synthetic readings for five incubator channels (temperature,
//! humidity, O2, CO2 and fan speed), checks them against operator ranges,
//! keeps a session history and exports it as CSV.
//!
//! Key properties:
//! - Output depends only on simulated time, the configuration and the random source
//! - Alarm evaluation is pure and ordered by channel
//! - Trend buffers are bounded; the export log grows until cleared
//!
//! ```no_run
//! use incubator_core::{SimulationConfig, SimulationSession};
//!
//! let mut session = SimulationSession::new(SimulationConfig::default())?;
//! session.start();
//!
//! if let Some(frame) = session.tick() {
//!     println!("{}", frame.status.message());
//! }
//! # Ok::<(), incubator_core::ConfigError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alarms;
pub mod buffer;
pub mod channel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod history;
pub mod reading;
pub mod session;
pub mod thresholds;
pub mod time;

// Public API
pub use alarms::{AlarmReport, AlarmStatus, Gauge};
pub use channel::Channel;
pub use config::SimulationConfig;
pub use errors::{ConfigError, ConfigResult, ExportError, ExportResult};
pub use generator::{ManualOverrides, ReadingGenerator};
pub use history::{ExportOutcome, HistoryLog};
pub use reading::{Reading, Sample};
pub use session::{Command, RunState, SimulationSession, TickFrame, TrendSeries};
pub use thresholds::{Threshold, ThresholdStore};
pub use time::{FixedClock, SimClock, SteppingClock, SystemClock, WallClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
