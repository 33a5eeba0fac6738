//! Shared fixtures for integration tests
//!
//! - Sessions with a seeded generator and a stepping wall clock
//! - A small CSV reader for checking exports against the log

#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use incubator_core::time::SteppingClock;
use incubator_core::{HistoryLog, ReadingGenerator, SimulationConfig, SimulationSession};

/// First timestamp handed out by [`session`]
pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

/// Default configuration with noise off
pub fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        noise_enabled: false,
        ..SimulationConfig::default()
    }
}

/// Session with a seeded generator, empty trend buffers and timestamps
/// spaced by the configured interval
pub fn session(config: SimulationConfig, seed: u64) -> SimulationSession {
    let step = config.interval();
    SimulationSession::with_generator(config, ReadingGenerator::seeded(seed))
        .unwrap()
        .with_wall_clock(SteppingClock::new(start_instant(), step))
        .with_history(HistoryLog::new())
}

/// Same as [`session`] but running
pub fn running_session(config: SimulationConfig, seed: u64) -> SimulationSession {
    let mut session = session(config, seed);
    session.start();
    session
}

/// Run `n` ticks, returning how many produced a frame
pub fn run_ticks(session: &mut SimulationSession, n: usize) -> usize {
    (0..n).filter_map(|_| session.tick()).count()
}

/// One parsed CSV data row
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub timestamp: DateTime<Utc>,
    pub values: [f64; 5],
    pub alarm: String,
}

/// Parse an export, checking the header
pub fn parse_export(bytes: &[u8]) -> Vec<CsvRow> {
    let text = std::str::from_utf8(bytes).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("timestamp,TEMP,HUMID,O2,CO2,FAN,alarm"));

    lines
        .map(|line| {
            let fields = split_fields(line);
            assert_eq!(fields.len(), 7, "malformed row {line:?}");
            let mut values = [0.0; 5];
            for (slot, field) in values.iter_mut().zip(&fields[1..6]) {
                *slot = field.parse().unwrap();
            }
            CsvRow {
                timestamp: DateTime::parse_from_rfc3339(&fields[0]).unwrap().with_timezone(&Utc),
                values,
                alarm: fields[6].clone(),
            }
        })
        .collect()
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', _) => quoted = !quoted,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Tick spacing as a chrono duration
pub fn chrono_step(interval: Duration) -> chrono::Duration {
    chrono::Duration::from_std(interval).unwrap()
}
