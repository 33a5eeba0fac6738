//! Simulation configuration
//!
//! Everything the external control surface can change between ticks:
//! ten threshold bounds, the tick interval, the noise flag and the two
//! manual overrides. Overrides use the control-surface encoding where `-1`
//! (any negative value) means "disabled".
//!
//! ```json
//! {
//!   "thresholds": { "TEMP": { "min": 36.0, "max": 38.0 } },
//!   "interval_ms": 250,
//!   "noise_enabled": false,
//!   "manual_temp": -1.0,
//!   "manual_humid": 55.0
//! }
//! ```
//!
//! Missing fields take their defaults. Documents are validated on load.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
use crate::errors::{ConfigError, ConfigResult};
use crate::generator::ManualOverrides;
use crate::thresholds::ThresholdStore;

/// Sentinel meaning "manual override disabled"
pub const OVERRIDE_DISABLED: f64 = -1.0;

/// Complete configuration surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Safe range per channel
    pub thresholds: ThresholdStore,
    /// Delay between ticks, also the simulated time added per tick
    pub interval_ms: u64,
    /// Add uniform jitter to every channel
    pub noise_enabled: bool,
    /// Manual temperature, negative to disable
    pub manual_temp: f64,
    /// Manual humidity, negative to disable
    pub manual_humid: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdStore::default(),
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
            noise_enabled: true,
            manual_temp: OVERRIDE_DISABLED,
            manual_humid: OVERRIDE_DISABLED,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check thresholds and tick interval
    pub fn validate(&self) -> ConfigResult<()> {
        self.thresholds.validate()?;
        validate_interval(self.interval_ms)
    }

    /// Tick interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Decoded manual overrides
    pub fn overrides(&self) -> ManualOverrides {
        ManualOverrides::from_sentinels(self.manual_temp, self.manual_humid)
    }
}

/// Check a tick interval against the accepted window
pub fn validate_interval(interval_ms: u64) -> ConfigResult<()> {
    if (MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&interval_ms) {
        Ok(())
    } else {
        Err(ConfigError::IntervalOutOfRange {
            interval_ms,
            min: MIN_TICK_INTERVAL_MS,
            max: MAX_TICK_INTERVAL_MS,
        })
    }
}
