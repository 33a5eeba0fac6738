//! Threshold store: safe operating range per channel
//!
//! Every write is validated. A pair is accepted only when both bounds are
//! finite and `min <= max`; otherwise the previous pair stays in force and a
//! [`ConfigError`] is returned. The tick pipeline therefore never evaluates
//! against an inverted range.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::errors::{ConfigError, ConfigResult};

/// Inclusive safe range for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Lowest value that does not raise an alarm
    pub min: f64,
    /// Highest value that does not raise an alarm
    pub max: f64,
}

impl Threshold {
    /// Validated pair for `channel`
    pub fn new(channel: Channel, min: f64, max: f64) -> ConfigResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteBound { channel });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { channel, min, max });
        }
        Ok(Self { min, max })
    }

    /// Whether `value` lies strictly outside `[min, max]`
    #[inline]
    pub fn is_violated_by(&self, value: f64) -> bool {
        value < self.min || value > self.max
    }
}

/// Threshold for every channel
///
/// Serializes as a map from parameter name to `{min, max}`:
///
/// ```json
/// { "TEMP": { "min": 36.0, "max": 38.0 }, "HUMID": { "min": 50.0, "max": 70.0 } }
/// ```
///
/// Channels missing from a document keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdStore {
    #[serde(rename = "TEMP")]
    temp: Threshold,
    #[serde(rename = "HUMID")]
    humid: Threshold,
    #[serde(rename = "O2")]
    o2: Threshold,
    #[serde(rename = "CO2")]
    co2: Threshold,
    #[serde(rename = "FAN")]
    fan: Threshold,
}

impl Default for ThresholdStore {
    fn default() -> Self {
        let default_for = |channel: Channel| {
            let profile = channel.profile();
            Threshold {
                min: profile.default_min,
                max: profile.default_max,
            }
        };

        Self {
            temp: default_for(Channel::Temp),
            humid: default_for(Channel::Humid),
            o2: default_for(Channel::O2),
            co2: default_for(Channel::Co2),
            fan: default_for(Channel::Fan),
        }
    }
}

impl ThresholdStore {
    /// Range currently configured for `channel`
    pub fn get(&self, channel: Channel) -> Threshold {
        *self.slot(channel)
    }

    /// Replace the range for `channel`
    ///
    /// Rejected pairs leave the store unchanged.
    pub fn set(&mut self, channel: Channel, min: f64, max: f64) -> ConfigResult<()> {
        let threshold = Threshold::new(channel, min, max)?;
        *self.slot_mut(channel) = threshold;
        Ok(())
    }

    /// Replace the range for a channel given by parameter name
    pub fn set_by_name(&mut self, parameter: &str, min: f64, max: f64) -> ConfigResult<()> {
        let channel: Channel = parameter.parse()?;
        self.set(channel, min, max)
    }

    /// Replace only the lower bound of `channel`
    pub fn set_min(&mut self, channel: Channel, min: f64) -> ConfigResult<()> {
        let current = self.get(channel);
        self.set(channel, min, current.max)
    }

    /// Replace only the upper bound of `channel`
    pub fn set_max(&mut self, channel: Channel, max: f64) -> ConfigResult<()> {
        let current = self.get(channel);
        self.set(channel, current.min, max)
    }

    /// Check every pair, e.g. after deserializing an untrusted document
    pub fn validate(&self) -> ConfigResult<()> {
        for channel in Channel::ALL {
            let threshold = self.get(channel);
            Threshold::new(channel, threshold.min, threshold.max)?;
        }
        Ok(())
    }

    /// `(channel, threshold)` pairs in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, Threshold)> + '_ {
        Channel::ALL.into_iter().map(move |channel| (channel, self.get(channel)))
    }

    fn slot(&self, channel: Channel) -> &Threshold {
        match channel {
            Channel::Temp => &self.temp,
            Channel::Humid => &self.humid,
            Channel::O2 => &self.o2,
            Channel::Co2 => &self.co2,
            Channel::Fan => &self.fan,
        }
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut Threshold {
        match channel {
            Channel::Temp => &mut self.temp,
            Channel::Humid => &mut self.humid,
            Channel::O2 => &mut self.o2,
            Channel::Co2 => &mut self.co2,
            Channel::Fan => &mut self.fan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_incubator_ranges() {
        let store = ThresholdStore::default();
        assert_eq!(store.get(Channel::Temp), Threshold { min: 36.0, max: 38.0 });
        assert_eq!(store.get(Channel::Humid), Threshold { min: 50.0, max: 70.0 });
        assert_eq!(store.get(Channel::O2), Threshold { min: 19.0, max: 25.0 });
        assert_eq!(store.get(Channel::Co2), Threshold { min: 0.03, max: 0.06 });
        assert_eq!(store.get(Channel::Fan), Threshold { min: 0.0, max: 100.0 });
        assert!(store.validate().is_ok());
    }

    #[test]
    fn inverted_pair_is_rejected_and_previous_kept() {
        let mut store = ThresholdStore::default();
        let result = store.set(Channel::Temp, 39.0, 35.0);

        assert!(matches!(result, Err(ConfigError::InvertedRange { channel: Channel::Temp, .. })));
        assert_eq!(store.get(Channel::Temp), Threshold { min: 36.0, max: 38.0 });
    }

    #[test]
    fn non_finite_bound_is_rejected() {
        let mut store = ThresholdStore::default();
        assert!(matches!(
            store.set(Channel::Fan, f64::NAN, 100.0),
            Err(ConfigError::NonFiniteBound { channel: Channel::Fan })
        ));
        assert!(store.set_max(Channel::O2, f64::INFINITY).is_err());
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let mut store = ThresholdStore::default();
        assert!(store.set(Channel::Humid, 55.0, 55.0).is_ok());
        assert!(!store.get(Channel::Humid).is_violated_by(55.0));
    }

    #[test]
    fn single_bound_updates_validate_against_other_bound() {
        let mut store = ThresholdStore::default();
        assert!(store.set_min(Channel::Temp, 38.5).is_err());
        assert!(store.set_min(Channel::Temp, 36.5).is_ok());
        assert_eq!(store.get(Channel::Temp).min, 36.5);
    }

    #[test]
    fn set_by_name_resolves_parameter() {
        let mut store = ThresholdStore::default();
        store.set_by_name("co2", 0.02, 0.05).unwrap();
        assert_eq!(store.get(Channel::Co2), Threshold { min: 0.02, max: 0.05 });
        assert!(matches!(
            store.set_by_name("NH3", 0.0, 1.0),
            Err(ConfigError::UnknownChannel(_))
        ));
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let store: ThresholdStore =
            serde_json::from_str(r#"{ "TEMP": { "min": 35.5, "max": 37.5 } }"#).unwrap();
        assert_eq!(store.get(Channel::Temp), Threshold { min: 35.5, max: 37.5 });
        assert_eq!(store.get(Channel::Fan), Threshold { min: 0.0, max: 100.0 });
    }

    #[test]
    fn boundaries_are_not_violations() {
        let threshold = Threshold { min: 36.0, max: 38.0 };
        assert!(!threshold.is_violated_by(36.0));
        assert!(!threshold.is_violated_by(38.0));
        assert!(threshold.is_violated_by(35.99));
        assert!(threshold.is_violated_by(38.01));
    }
}
