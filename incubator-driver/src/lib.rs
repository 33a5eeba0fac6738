//! Tick driver for the incubator simulator
//!
//! ## Overview
//!
//! The core crate knows how to run one tick. This crate decides *when*:
//! a tokio task owns the [`SimulationSession`] and, while it is running,
//! runs the tick pipeline once per configured interval and hands each
//! [`TickFrame`] to a [`FrameSink`].
//!
//! ```text
//!  DriverHandle ──ControlCommand──▶ ┌────────────┐ ──TickFrame──▶ FrameSink
//!                ◀──oneshot reply── │ tick task  │                (renderer)
//!                                   └────────────┘
//! ```
//!
//! ## Scheduling
//!
//! - One tick runs to completion before the next is scheduled
//! - The interval is measured from the end of a tick, so an interval change
//!   takes effect from the next scheduled tick
//! - Commands are served before a due tick, so a `stop` received before the
//!   deadline prevents that tick
//! - `start` from `Stopped` ticks immediately
//!
//! ## Example Usage
//!
//! ```no_run
//! use incubator_core::{SimulationConfig, SimulationSession};
//! use incubator_driver::spawn;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SimulationSession::new(SimulationConfig::default())?;
//! let handle = spawn(session, |frame: incubator_core::TickFrame| {
//!     println!("{}", frame.status_line());
//! });
//!
//! handle.start().await?;
//! tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//! let session = handle.shutdown().await?;
//! println!("{} readings logged", session.history().len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod command;
pub mod driver;
pub mod sink;

pub use command::ControlCommand;
pub use driver::{spawn, spawn_seeded, DriverHandle, TickDriver};
pub use sink::ChannelSink;

use incubator_core::{ConfigError, ExportError, TickFrame};
use thiserror::Error;

/// Driver errors
#[derive(Debug, Error)]
pub enum DriverError {
    /// The tick task has exited
    #[error("Driver stopped")]
    Closed,

    /// A configuration update was rejected
    #[error("Configuration rejected: {0}")]
    Config(#[from] ConfigError),

    /// Writing the export file failed
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// The tick task panicked or was cancelled
    #[error("Driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Receiver of frames produced by the tick task
///
/// Called from inside the task, so implementations must not block.
pub trait FrameSink: Send {
    /// Deliver one frame
    fn publish(&mut self, frame: TickFrame);
}

impl<F> FrameSink for F
where
    F: FnMut(TickFrame) + Send,
{
    fn publish(&mut self, frame: TickFrame) {
        self(frame)
    }
}
