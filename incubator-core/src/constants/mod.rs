//! Constants for the incubator simulation core
//!
//! All numeric values used by the simulation are defined here so that the
//! waveform shapes, default safe ranges and buffer sizes live in one place.
//!
//! ## Organization
//!
//! - **Channels**: waveform parameters, noise bounds, rounding and default
//!   thresholds for each simulated sensor
//! - **Time**: tick interval limits and defaults
//! - **Buffers**: trend buffer capacity

/// Per-channel waveform, noise and threshold constants.
pub mod channels;

/// Tick interval limits and defaults.
pub mod time;

/// Buffer sizes for trend history.
pub mod buffers;

pub use buffers::TREND_CAPACITY;
pub use time::{DEFAULT_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
