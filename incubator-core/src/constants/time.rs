//! Time Constants for the Tick Pipeline
//!
//! The tick interval is both the wall-clock delay between ticks and the
//! amount of simulated time added to the [`SimClock`](crate::time::SimClock)
//! on every step.

/// Shortest accepted tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Longest accepted tick interval.
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

/// Tick interval used when none is configured.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

const _: () = assert!(MIN_TICK_INTERVAL_MS <= DEFAULT_TICK_INTERVAL_MS);
const _: () = assert!(DEFAULT_TICK_INTERVAL_MS <= MAX_TICK_INTERVAL_MS);

/// Timestamp layout used in export file names.
pub const EXPORT_FILENAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";
