//! Error Types for Configuration and Export
//!
//! The simulation step itself cannot fail: generation, alarm evaluation and
//! history appends are infallible. Errors only arise at the two edges of the
//! core:
//!
//! ### Configuration
//! - `InvertedRange`: a threshold pair with `min > max`
//! - `NonFiniteBound`: a threshold bound that is NaN or infinite
//! - `IntervalOutOfRange`: a tick interval outside 50..=1000 ms
//! - `UnknownChannel`: a parameter name that is not one of the five channels
//! - `Parse` / `Io`: a configuration file that cannot be read or decoded
//!
//! ### Export
//! - `Io`: the CSV file could not be written
//!
//! An empty log is not an error. Exporting it yields
//! [`ExportOutcome::NoData`](crate::history::ExportOutcome::NoData).
//!
//! ## Handling Strategy
//!
//! ```rust
//! use incubator_core::{Channel, ConfigError, ThresholdStore};
//!
//! let mut store = ThresholdStore::default();
//! match store.set(Channel::Temp, 39.0, 35.0) {
//!     Ok(()) => {}
//!     Err(ConfigError::InvertedRange { .. }) => {
//!         // Previous TEMP range is still in force
//!     }
//!     Err(_) => {}
//! }
//! assert_eq!(store.get(Channel::Temp).min, 36.0);
//! ```

use thiserror::Error;

use crate::channel::Channel;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Rejected configuration input
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Threshold pair whose lower bound exceeds its upper bound
    #[error("{channel} threshold min {min} exceeds max {max}")]
    InvertedRange {
        /// Channel the pair belongs to
        channel: Channel,
        /// Rejected lower bound
        min: f64,
        /// Rejected upper bound
        max: f64,
    },

    /// Threshold bound that is NaN or infinite
    #[error("{channel} threshold bound is not a finite number")]
    NonFiniteBound {
        /// Channel the bound belongs to
        channel: Channel,
    },

    /// Tick interval outside the accepted window
    #[error("tick interval {interval_ms} ms outside [{min}, {max}] ms")]
    IntervalOutOfRange {
        /// Rejected interval
        interval_ms: u64,
        /// Shortest accepted interval
        min: u64,
        /// Longest accepted interval
        max: u64,
    },

    /// Parameter name that does not map to a channel
    #[error("unknown parameter '{0}'")]
    UnknownChannel(String),

    /// Configuration document could not be decoded
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while writing an export file
#[derive(Error, Debug)]
pub enum ExportError {
    /// The CSV file could not be created or written
    #[error("cannot write export file: {0}")]
    Io(#[from] std::io::Error),
}
