//! Readings produced by the tick pipeline
//!
//! A [`Sample`] is the pure output of the generator: five rounded channel
//! values with no timestamp. A [`Reading`] is what the history log owns: the
//! sample stamped with its wall-clock instant and the alarm text computed for
//! it. Readings are immutable once built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Rounded channel values of one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Temperature (°C), 2 decimals
    #[serde(rename = "TEMP")]
    pub temp: f64,
    /// Relative humidity (%), 1 decimal
    #[serde(rename = "HUMID")]
    pub humid: f64,
    /// Oxygen (%), 2 decimals
    #[serde(rename = "O2")]
    pub o2: f64,
    /// Carbon dioxide (%), 3 decimals
    #[serde(rename = "CO2")]
    pub co2: f64,
    /// Fan speed (%), integer
    #[serde(rename = "FAN")]
    pub fan: i64,
}

impl Sample {
    /// Value of `channel` as a float, for comparisons and charts
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temp => self.temp,
            Channel::Humid => self.humid,
            Channel::O2 => self.o2,
            Channel::Co2 => self.co2,
            Channel::Fan => self.fan as f64,
        }
    }

    /// Value of `channel` formatted the way it appears in alarm text and CSV
    pub fn display_value(&self, channel: Channel) -> String {
        match channel {
            Channel::Fan => self.fan.to_string(),
            other => format_decimal(self.value(other)),
        }
    }
}

/// Shortest round-trip form of `value`, always with a fractional part
///
/// `40.0` renders as `"40.0"` rather than `"40"`, so float channels stay
/// distinguishable from the integer FAN column.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

/// Timestamped sample with its alarm text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Wall-clock instant the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Channel values
    #[serde(flatten)]
    pub sample: Sample,
    /// `"; "`-joined violations, empty when every channel is in range
    pub alarm: String,
}

impl Reading {
    /// Assemble a reading
    pub fn new(timestamp: DateTime<Utc>, sample: Sample, alarm: String) -> Self {
        Self {
            timestamp,
            sample,
            alarm,
        }
    }

    /// Value of `channel`
    #[inline]
    pub fn value(&self, channel: Channel) -> f64 {
        self.sample.value(channel)
    }

    /// Whether any channel was out of range
    #[inline]
    pub fn has_alarm(&self) -> bool {
        !self.alarm.is_empty()
    }
}
