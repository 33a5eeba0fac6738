//! Threshold alarm evaluation
//!
//! ## Evaluation
//!
//! [`evaluate`] checks the five channels in TEMP, HUMID, O2, CO2, FAN order
//! and records one [`Violation`] for each value strictly outside its
//! `[min, max]` range. Values equal to a bound never alarm. The violations
//! render as `"<PARAM> <value>"` joined with `"; "`, e.g.
//! `"TEMP 38.5; FAN 101"`; no violations render as the empty string.
//!
//! Evaluation is pure: the same sample against the same store always yields
//! the same report.
//!
//! ## Presentation
//!
//! Pausing alarms never suppresses detection or logging. It only changes the
//! [`AlarmStatus`] handed to the renderer from `Active` to `Paused`.
//!
//! ```rust
//! use incubator_core::alarms::{evaluate, AlarmStatus};
//! use incubator_core::reading::Sample;
//! use incubator_core::ThresholdStore;
//!
//! let sample = Sample { temp: 38.5, humid: 60.0, o2: 21.0, co2: 0.04, fan: 50 };
//! let report = evaluate(&sample, &ThresholdStore::default());
//!
//! assert_eq!(report.to_string(), "TEMP 38.5");
//! assert_eq!(AlarmStatus::classify(&report.to_string(), true).label(), "paused");
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::reading::Sample;
use crate::thresholds::{Threshold, ThresholdStore};

/// Separator between violations in the alarm text
pub const ALARM_SEPARATOR: &str = "; ";

/// One out-of-range channel
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Offending channel
    pub channel: Channel,
    /// Value as it appears in the alarm text
    pub value: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.channel, self.value)
    }
}

/// Ordered violations of one evaluation, at most one per channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmReport {
    violations: heapless::Vec<Violation, { Channel::COUNT }>,
}

impl AlarmReport {
    /// Violations in channel order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// No channel out of range
    pub fn is_normal(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether `channel` was flagged
    pub fn contains(&self, channel: Channel) -> bool {
        self.violations.iter().any(|v| v.channel == channel)
    }

    fn push(&mut self, violation: Violation) {
        // One slot per channel, so capacity is never exceeded
        let _ = self.violations.push(violation);
    }
}

impl fmt::Display for AlarmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(ALARM_SEPARATOR)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Compare `sample` against every configured range
pub fn evaluate(sample: &Sample, thresholds: &ThresholdStore) -> AlarmReport {
    let mut report = AlarmReport::default();
    for (channel, threshold) in thresholds.iter() {
        if threshold.is_violated_by(sample.value(channel)) {
            report.push(Violation {
                channel,
                value: sample.display_value(channel),
            });
        }
    }
    report
}

/// How the current alarm should be surfaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "alarm", rename_all = "snake_case")]
pub enum AlarmStatus {
    /// Every channel in range
    Normal,
    /// Violations present and alarms armed
    Active(String),
    /// Violations present while alarms are paused
    Paused(String),
}

impl AlarmStatus {
    /// Classify a raw alarm string under the current pause flag
    pub fn classify(alarm: &str, paused: bool) -> Self {
        match (alarm.is_empty(), paused) {
            (true, _) => AlarmStatus::Normal,
            (false, false) => AlarmStatus::Active(alarm.to_string()),
            (false, true) => AlarmStatus::Paused(alarm.to_string()),
        }
    }

    /// Short machine-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            AlarmStatus::Normal => "normal",
            AlarmStatus::Active(_) => "active",
            AlarmStatus::Paused(_) => "paused",
        }
    }

    /// Operator-facing message
    pub fn message(&self) -> String {
        match self {
            AlarmStatus::Normal => "All parameters normal".to_string(),
            AlarmStatus::Active(alarm) => alarm.clone(),
            AlarmStatus::Paused(alarm) => format!("Alarm paused: {alarm}"),
        }
    }
}

/// Position of `value` inside `[min, max]` as a percentage clamped to 0..=100
///
/// A degenerate range (`min == max`) reads 100 at or above the bound and 0
/// below it.
pub fn percent_in_range(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return if value >= max { 100.0 } else { 0.0 };
    }
    let percent = (value - min) / (max - min) * 100.0;
    percent.clamp(0.0, 100.0)
}

/// Gauge state of one channel for the vitals panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Channel shown
    pub channel: Channel,
    /// Current value
    pub value: f64,
    /// Fill level, see [`percent_in_range`]
    pub percent: f64,
    /// Whether the value is inside its safe range
    pub in_range: bool,
}

impl Gauge {
    /// Gauge for `channel` of `sample` under `threshold`
    pub fn new(channel: Channel, sample: &Sample, threshold: Threshold) -> Self {
        let value = sample.value(channel);
        Self {
            channel,
            value,
            percent: percent_in_range(value, threshold.min, threshold.max),
            in_range: !threshold.is_violated_by(value),
        }
    }
}

/// Gauges for every channel in display order
pub fn gauges(sample: &Sample, thresholds: &ThresholdStore) -> [Gauge; Channel::COUNT] {
    Channel::ALL.map(|channel| Gauge::new(channel, sample, thresholds.get(channel)))
}
