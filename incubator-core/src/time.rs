//! Time management for the simulation
//!
//! Two independent notions of time are involved in every tick:
//! - **Simulated time** ([`SimClock`]): seconds fed into the waveforms,
//!   advanced by the tick interval on every step
//! - **Wall clock** ([`WallClock`]): the instant stamped on each reading and
//!   used to name export files

use core::time::Duration;

use chrono::{DateTime, Utc};

/// Monotonic simulated-time accumulator
///
/// Starts at zero and only moves forward. It is never reset during a
/// session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    elapsed_s: f64,
}

impl SimClock {
    /// Clock at t = 0
    pub const fn new() -> Self {
        Self { elapsed_s: 0.0 }
    }

    /// Simulated seconds elapsed so far
    pub fn now(&self) -> f64 {
        self.elapsed_s
    }

    /// Advance by one tick and return the new time
    pub fn advance(&mut self, step: Duration) -> f64 {
        self.elapsed_s += step.as_secs_f64();
        self.elapsed_s
    }
}

/// Source of wall-clock instants for reading timestamps
pub trait WallClock: Send {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// System time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Controllable time source for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Clock frozen at `instant`
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Move the frozen instant forward
    pub fn advance(&mut self, by: Duration) {
        self.instant += chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
    }

    /// Set the frozen instant
    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.instant = instant;
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Stepping clock: each call returns the next instant
///
/// Gives consecutive readings distinct, evenly spaced timestamps in tests.
#[derive(Debug)]
pub struct SteppingClock {
    next: std::sync::Mutex<DateTime<Utc>>,
    step: chrono::Duration,
}

impl SteppingClock {
    /// Clock whose first reading is `start`, then `start + step`, ...
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: std::sync::Mutex::new(start),
            step: chrono::Duration::from_std(step).unwrap_or_else(|_| chrono::Duration::zero()),
        }
    }
}

impl WallClock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let current = *next;
        *next = current + self.step;
        current
    }
}
