//! Simulation session: owned state and the per-tick pipeline
//!
//! A [`SimulationSession`] owns everything one dashboard needs: the
//! configuration, the simulated clock, the reading generator, the history
//! and the run/pause flags. The driver holds it by value and calls
//! [`tick`](SimulationSession::tick) once per interval.
//!
//! ## Run State
//!
//! ```text
//!            start                stop
//!   ┌──────────────────┐  ┌──────────────────┐
//!   │                  ▼  │                  ▼
//! Stopped ──start──▶ Running ──stop──▶ Stopped
//! ```
//!
//! Both transitions are accepted from either state, so repeating a command
//! is a no-op. Nothing transitions automatically.
//!
//! The alarm pause flag is orthogonal: it never blocks detection or
//! logging, only the [`AlarmStatus`] reported in each frame.
//!
//! ## Tick Pipeline
//!
//! 1. advance the [`SimClock`] by the configured interval
//! 2. generate a sample from the new simulated time
//! 3. evaluate it against the thresholds
//! 4. stamp it and append it to the history
//! 5. return a [`TickFrame`] for the renderer

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alarms::{self, AlarmStatus, Gauge};
use crate::channel::Channel;
use crate::config::{validate_interval, SimulationConfig};
use crate::constants::TREND_CAPACITY;
use crate::errors::{ConfigResult, ExportResult};
use crate::generator::ReadingGenerator;
use crate::history::{ExportOutcome, HistoryLog};
use crate::reading::Reading;
use crate::time::{SimClock, SystemClock, WallClock};

/// Whether the tick driver should be producing readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No ticks are produced
    #[default]
    Stopped,
    /// A tick runs every interval
    Running,
}

impl RunState {
    /// Label shown in the status bar
    pub const fn label(&self) -> &'static str {
        match self {
            RunState::Stopped => "Stopped",
            RunState::Running => "Running",
        }
    }
}

/// Discrete commands of the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Enter `Running`
    Start,
    /// Enter `Stopped`
    Stop,
    /// Flip the alarm pause flag
    ToggleAlarmPause,
    /// Empty the export log
    ClearLog,
}

/// Recent values of one channel for its trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Channel charted
    pub channel: Channel,
    /// Oldest first, at most [`TREND_CAPACITY`] values
    pub values: Vec<f64>,
}

/// Everything the renderer needs after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickFrame {
    /// Reading produced by this tick, including its raw alarm text
    pub reading: Reading,
    /// Alarm classification under the current pause flag
    pub status: AlarmStatus,
    /// Pause flag at the time of the tick
    pub alarm_paused: bool,
    /// Run state at the time of the tick
    pub run_state: RunState,
    /// Simulated seconds elapsed
    pub sim_time: f64,
    /// Total rows in the export log
    pub log_rows: usize,
    /// Timestamp of the most recent logged reading
    pub last_update: Option<DateTime<Utc>>,
    /// Vitals gauges in channel order
    pub gauges: Vec<Gauge>,
    /// Trend chart data in channel order
    pub trends: Vec<TrendSeries>,
}

impl TickFrame {
    /// One-line status summary, e.g.
    /// `Running | 12 rows | last update 08:00:02 | TEMP 38.5`
    pub fn status_line(&self) -> String {
        format!(
            "{} | {} rows | last update {} | {}",
            self.run_state.label(),
            self.log_rows,
            format_last_update(self.last_update),
            self.status.message()
        )
    }
}

/// Render a last-update timestamp, `"no data"` when nothing is logged
pub fn format_last_update(last_update: Option<DateTime<Utc>>) -> String {
    match last_update {
        Some(instant) => instant.format("%H:%M:%S").to_string(),
        None => "no data".to_string(),
    }
}

/// Owned state of one simulated incubator dashboard
pub struct SimulationSession<R = StdRng> {
    config: SimulationConfig,
    clock: SimClock,
    generator: ReadingGenerator<R>,
    wall_clock: Box<dyn WallClock>,
    history: HistoryLog,
    run_state: RunState,
    alarm_paused: bool,
}

impl SimulationSession<StdRng> {
    /// Session with an entropy-seeded generator, the system clock and
    /// baseline-filled trend buffers
    pub fn new(config: SimulationConfig) -> ConfigResult<Self> {
        Self::with_generator(config, ReadingGenerator::from_entropy())
    }
}

impl<R: Rng> SimulationSession<R> {
    /// Session using `generator` as its random source
    pub fn with_generator(config: SimulationConfig, generator: ReadingGenerator<R>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: SimClock::new(),
            generator,
            wall_clock: Box::new(SystemClock),
            history: HistoryLog::with_baseline(),
            run_state: RunState::Stopped,
            alarm_paused: false,
        })
    }

    /// Replace the wall clock used to stamp readings and name exports
    pub fn with_wall_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.wall_clock = Box::new(clock);
        self
    }

    /// Replace the history, e.g. to start with empty trend buffers
    pub fn with_history(mut self, history: HistoryLog) -> Self {
        self.history = history;
        self
    }

    // ===== CONTROL SURFACE =====

    /// Apply one control command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::ToggleAlarmPause => self.toggle_alarm_pause(),
            Command::ClearLog => self.clear_log(),
        }
    }

    /// Enter `Running`
    pub fn start(&mut self) {
        if self.run_state != RunState::Running {
            info!("Simulation started (interval {} ms)", self.config.interval_ms);
        }
        self.run_state = RunState::Running;
    }

    /// Enter `Stopped`
    pub fn stop(&mut self) {
        if self.run_state != RunState::Stopped {
            info!("Simulation stopped after {} readings", self.history.len());
        }
        self.run_state = RunState::Stopped;
    }

    /// Flip the alarm pause flag
    pub fn toggle_alarm_pause(&mut self) {
        self.alarm_paused = !self.alarm_paused;
        info!("Alarm {}", if self.alarm_paused { "paused" } else { "resumed" });
    }

    /// Empty the export log
    pub fn clear_log(&mut self) {
        self.history.clear();
        info!("Log cleared");
    }

    // ===== CONFIGURATION SURFACE =====

    /// Replace the safe range of `channel`
    pub fn set_threshold(&mut self, channel: Channel, min: f64, max: f64) -> ConfigResult<()> {
        self.config
            .thresholds
            .set(channel, min, max)
            .inspect_err(|err| warn!("Rejected threshold update: {err}"))
    }

    /// Change the tick interval
    pub fn set_interval_ms(&mut self, interval_ms: u64) -> ConfigResult<()> {
        validate_interval(interval_ms).inspect_err(|err| warn!("Rejected interval update: {err}"))?;
        self.config.interval_ms = interval_ms;
        Ok(())
    }

    /// Enable or disable jitter
    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.config.noise_enabled = enabled;
    }

    /// Set the manual temperature, negative to disable
    pub fn set_manual_temp(&mut self, value: f64) {
        self.config.manual_temp = value;
    }

    /// Set the manual humidity, negative to disable
    pub fn set_manual_humid(&mut self, value: f64) {
        self.config.manual_humid = value;
    }

    /// Replace the whole configuration
    ///
    /// Invalid documents are rejected and the current configuration kept.
    pub fn update_config(&mut self, config: SimulationConfig) -> ConfigResult<()> {
        config
            .validate()
            .inspect_err(|err| warn!("Rejected configuration: {err}"))?;
        self.config = config;
        Ok(())
    }

    // ===== TICK PIPELINE =====

    /// Run one tick if the session is running
    pub fn tick(&mut self) -> Option<TickFrame> {
        match self.run_state {
            RunState::Running => Some(self.step()),
            RunState::Stopped => None,
        }
    }

    /// Run the tick pipeline once regardless of run state
    pub fn step(&mut self) -> TickFrame {
        let sim_time = self.clock.advance(self.config.interval());
        let sample = self
            .generator
            .generate(sim_time, self.config.noise_enabled, self.config.overrides());
        let alarm = alarms::evaluate(&sample, &self.config.thresholds).to_string();
        let reading = Reading::new(self.wall_clock.now(), sample, alarm);

        let status = AlarmStatus::classify(&reading.alarm, self.alarm_paused);
        match &status {
            AlarmStatus::Active(alarm) => warn!("Alarm: {alarm}"),
            AlarmStatus::Paused(alarm) => debug!("Alarm (paused): {alarm}"),
            AlarmStatus::Normal => {}
        }
        debug!(
            "t={sim_time:.2}s TEMP={} HUMID={} O2={} CO2={} FAN={}",
            sample.temp, sample.humid, sample.o2, sample.co2, sample.fan
        );

        self.history.append(reading.clone());

        TickFrame {
            gauges: alarms::gauges(&sample, &self.config.thresholds).to_vec(),
            trends: self.trend_series(),
            reading,
            status,
            alarm_paused: self.alarm_paused,
            run_state: self.run_state,
            sim_time,
            log_rows: self.history.len(),
            last_update: self.history.last_update(),
        }
    }

    fn trend_series(&self) -> Vec<TrendSeries> {
        Channel::ALL
            .into_iter()
            .map(|channel| TrendSeries {
                channel,
                values: self.history.recent(channel, TREND_CAPACITY),
            })
            .collect()
    }

    // ===== EXPORT =====

    /// Write the export log to `dir`, named after the current wall-clock
    /// instant
    pub fn export_to_dir(&self, dir: &Path) -> ExportResult<ExportOutcome> {
        self.history.export_to_dir(dir, self.wall_clock.now())
    }

    // ===== ACCESSORS =====

    /// Current configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Reading history
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Current run state
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Whether ticks are being produced
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Whether alarms are paused
    pub fn alarm_paused(&self) -> bool {
        self.alarm_paused
    }

    /// Simulated seconds elapsed
    pub fn sim_time(&self) -> f64 {
        self.clock.now()
    }

    /// Timestamp of the most recent logged reading
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.history.last_update()
    }
}
