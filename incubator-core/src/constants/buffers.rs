//! Buffer Sizes for Trend History
//!
//! The unbounded export log grows for the session lifetime; only the
//! per-channel trend buffers have a fixed size.

/// Number of samples kept per channel for trend charts.
///
/// At the default 200 ms tick this covers one minute of data.
pub const TREND_CAPACITY: usize = 300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_capacity_covers_one_minute_at_default_tick() {
        let ticks_per_minute = 60_000 / crate::constants::DEFAULT_TICK_INTERVAL_MS as usize;
        assert!(TREND_CAPACITY >= ticks_per_minute);
    }
}
