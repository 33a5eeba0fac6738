//! Reading history: export log and trend buffers
//!
//! ## Overview
//!
//! The history keeps two views of the same readings:
//!
//! 1. **Export log**: every reading of the session, in order, with its alarm
//!    text. Unbounded; emptied only by [`HistoryLog::clear`].
//! 2. **Trend buffers**: one [`CircularBuffer`] of
//!    [`TREND_CAPACITY`] values per channel, feeding the trend charts.
//!
//! `clear()` empties the export log only. Trend buffers keep their contents
//! so charts stay continuous across a log reset; [`HistoryLog::clear_trends`]
//! empties them explicitly.
//!
//! ## CSV Export
//!
//! ```csv
//! timestamp,TEMP,HUMID,O2,CO2,FAN,alarm
//! 2024-03-01T08:00:00.200000Z,37.0,60.0,21.0,0.04,50,
//! 2024-03-01T08:00:00.400000Z,38.5,60.1,21.0,0.04,50,TEMP 38.5
//! ```
//!
//! Timestamps are RFC 3339 (ISO-8601) in UTC with microsecond precision.
//! An empty log exports nothing and reports [`ExportOutcome::NoData`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;

use crate::buffer::CircularBuffer;
use crate::channel::Channel;
use crate::constants::time::EXPORT_FILENAME_TIME_FORMAT;
use crate::constants::TREND_CAPACITY;
use crate::errors::ExportResult;
use crate::reading::Reading;

/// Per-channel trend buffer
pub type TrendBuffer = CircularBuffer<f64, TREND_CAPACITY>;

/// CSV header row
pub const CSV_HEADER: &str = "timestamp,TEMP,HUMID,O2,CO2,FAN,alarm";

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written
    Written {
        /// Location of the CSV file
        path: PathBuf,
        /// Number of data rows (header excluded)
        rows: usize,
    },
    /// Log was empty, nothing written
    NoData,
}

/// Session reading history
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Reading>,
    trends: Box<[TrendBuffer; Channel::COUNT]>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Empty log with empty trend buffers
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            trends: Box::new(core::array::from_fn(|_| TrendBuffer::new())),
        }
    }

    /// Empty log whose trend buffers start full of each channel's center
    /// value, so charts begin as a flat baseline
    pub fn with_baseline() -> Self {
        Self {
            entries: Vec::new(),
            trends: Box::new(Channel::ALL.map(|channel| TrendBuffer::filled(channel.profile().center))),
        }
    }

    /// Record a reading in the export log and every trend buffer
    pub fn append(&mut self, reading: Reading) {
        for channel in Channel::ALL {
            self.trends[channel.index()].push(reading.value(channel));
        }
        self.entries.push(reading);
    }

    /// Up to the last `n` trend values of `channel`, oldest first
    ///
    /// `n` is capped by [`TREND_CAPACITY`].
    pub fn recent(&self, channel: Channel, n: usize) -> Vec<f64> {
        self.trends[channel.index()].recent(n)
    }

    /// Trend buffer of `channel`
    pub fn trend(&self, channel: Channel) -> &TrendBuffer {
        &self.trends[channel.index()]
    }

    /// Every logged reading, oldest first
    pub fn entries(&self) -> &[Reading] {
        &self.entries
    }

    /// Number of logged readings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the export log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&Reading> {
        self.entries.last()
    }

    /// Timestamp of the most recent reading
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last().map(|reading| reading.timestamp)
    }

    /// Empty the export log; trend buffers are kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Empty every trend buffer
    pub fn clear_trends(&mut self) {
        for trend in self.trends.iter_mut() {
            trend.clear();
        }
    }

    /// Serialize the export log as CSV
    ///
    /// Returns `None` when there is nothing to export.
    pub fn export(&self) -> Option<Vec<u8>> {
        if self.entries.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(64 * (self.entries.len() + 1));
        out.push_str(CSV_HEADER);
        out.push('\n');
        for reading in &self.entries {
            write_row(&mut out, reading);
        }
        Some(out.into_bytes())
    }

    /// Write the export log to `dir` as `incubator_log_<YYYYMMDD_HHMMSS>.csv`
    /// named after `instant`
    pub fn export_to_dir(&self, dir: &Path, instant: DateTime<Utc>) -> ExportResult<ExportOutcome> {
        let Some(bytes) = self.export() else {
            info!("No data to save yet.");
            return Ok(ExportOutcome::NoData);
        };

        let path = dir.join(export_filename(instant));
        fs::write(&path, bytes)?;
        info!("Saved log to {} ({} rows)", path.display(), self.entries.len());

        Ok(ExportOutcome::Written {
            path,
            rows: self.entries.len(),
        })
    }
}

/// Export file name for `instant`
pub fn export_filename(instant: DateTime<Utc>) -> String {
    format!("incubator_log_{}.csv", instant.format(EXPORT_FILENAME_TIME_FORMAT))
}

fn write_row(out: &mut String, reading: &Reading) {
    out.push_str(&reading.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true));
    for channel in Channel::ALL {
        out.push(',');
        out.push_str(&reading.sample.display_value(channel));
    }
    out.push(',');
    out.push_str(&escape_field(&reading.alarm));
    out.push('\n');
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
