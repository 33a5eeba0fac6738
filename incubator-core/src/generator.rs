//! Synthetic reading generator
//!
//! Produces one [`Sample`] per call from simulated time alone. Each channel
//! is a sinusoid around its center (see [`constants::channels`]) with optional
//! uniform jitter, rounded to the channel's precision.
//!
//! Manual overrides exist only for TEMP and HUMID. A non-negative override
//! replaces the computed channel value before rounding, so it is reported at
//! the channel's precision like any other value.
//!
//! The random source is a type parameter so tests can seed it:
//!
//! ```rust
//! use incubator_core::generator::{ManualOverrides, ReadingGenerator};
//!
//! let mut generator = ReadingGenerator::seeded(7);
//! let sample = generator.generate(12.0, false, ManualOverrides::none());
//! assert_eq!(sample.temp, 37.17);
//! ```
//!
//! [`constants::channels`]: crate::constants::channels

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::reading::Sample;

/// Optional operator-supplied values for TEMP and HUMID
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualOverrides {
    /// Replaces the simulated temperature when set
    pub temp: Option<f64>,
    /// Replaces the simulated humidity when set
    pub humid: Option<f64>,
}

impl ManualOverrides {
    /// No overrides
    pub const fn none() -> Self {
        Self {
            temp: None,
            humid: None,
        }
    }

    /// Build from the control-surface encoding where any negative value
    /// (conventionally `-1`) means "disabled"
    pub fn from_sentinels(temp: f64, humid: f64) -> Self {
        Self {
            temp: sentinel_to_option(temp),
            humid: sentinel_to_option(humid),
        }
    }
}

fn sentinel_to_option(value: f64) -> Option<f64> {
    // NaN compares false and therefore counts as disabled
    if value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Noise-free waveform value of `channel` at simulated time `t` (seconds)
pub fn baseline(channel: Channel, t: f64) -> f64 {
    let profile = channel.profile();
    profile.center + profile.amplitude * (profile.omega * t).sin()
}

/// Round `value` to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Reading generator over an injectable random source
#[derive(Debug, Clone)]
pub struct ReadingGenerator<R = StdRng> {
    rng: R,
}

impl ReadingGenerator<StdRng> {
    /// Generator with a deterministic seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ReadingGenerator<R> {
    /// Wrap an existing random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce one rounded sample at simulated time `sim_time`
    ///
    /// With `noise_enabled` every channel draws one uniform offset in
    /// TEMP, HUMID, O2, CO2, FAN order, including channels that end up
    /// overridden, so the random stream does not depend on overrides.
    pub fn generate(&mut self, sim_time: f64, noise_enabled: bool, overrides: ManualOverrides) -> Sample {
        let mut raw = [0.0f64; Channel::COUNT];
        for channel in Channel::ALL {
            let mut value = baseline(channel, sim_time);
            if noise_enabled {
                let bound = channel.profile().noise_bound;
                value += self.rng.gen_range(-bound..=bound);
            }
            raw[channel.index()] = value;
        }

        if let Some(temp) = overrides.temp {
            raw[Channel::Temp.index()] = temp;
        }
        if let Some(humid) = overrides.humid {
            raw[Channel::Humid.index()] = humid;
        }

        let rounded = |channel: Channel| round_to(raw[channel.index()], channel.profile().decimals);
        Sample {
            temp: rounded(Channel::Temp),
            humid: rounded(Channel::Humid),
            o2: rounded(Channel::O2),
            co2: rounded(Channel::Co2),
            fan: rounded(Channel::Fan) as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_at_zero_is_center() {
        for channel in Channel::ALL {
            assert_eq!(baseline(channel, 0.0), channel.profile().center);
        }
    }

    #[test]
    fn noiseless_sample_at_zero() {
        let mut generator = ReadingGenerator::seeded(1);
        let sample = generator.generate(0.0, false, ManualOverrides::none());

        assert_eq!(sample.temp, 37.0);
        assert_eq!(sample.humid, 60.0);
        assert_eq!(sample.o2, 21.0);
        assert_eq!(sample.co2, 0.04);
        assert_eq!(sample.fan, 50);
    }

    #[test]
    fn rounding_precision_per_channel() {
        // t = 10: sin(0.5)=0.4794, sin(0.3)=0.2955, sin(0.2)=0.1987, sin(0.1)=0.0998
        let mut generator = ReadingGenerator::seeded(1);
        let sample = generator.generate(10.0, false, ManualOverrides::none());

        assert_eq!(sample.temp, 37.14);
        assert_eq!(sample.humid, 61.5);
        assert_eq!(sample.o2, 21.1);
        assert_eq!(sample.co2, 0.041);
        assert_eq!(sample.fan, 52);
    }

    #[test]
    fn noise_stays_within_bounds() {
        let mut generator = ReadingGenerator::seeded(99);
        for step in 0..500 {
            let t = step as f64 * 0.2;
            let sample = generator.generate(t, true, ManualOverrides::none());
            for channel in Channel::ALL {
                let profile = channel.profile();
                // rounding can move a value by at most half a unit in the last place
                let slack = 0.5 * 10f64.powi(-(profile.decimals as i32)) + 1e-9;
                let deviation = (sample.value(channel) - baseline(channel, t)).abs();
                assert!(deviation <= profile.noise_bound + slack, "{channel} deviated {deviation}");
            }
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ReadingGenerator::seeded(5);
        let mut b = ReadingGenerator::seeded(5);
        for step in 0..20 {
            let t = step as f64;
            assert_eq!(
                a.generate(t, true, ManualOverrides::none()),
                b.generate(t, true, ManualOverrides::none())
            );
        }
    }

    #[test]
    fn overrides_replace_only_their_channel() {
        let mut generator = ReadingGenerator::seeded(3);
        let overrides = ManualOverrides {
            temp: Some(40.0),
            humid: None,
        };
        let sample = generator.generate(123.4, false, overrides);

        assert_eq!(sample.temp, 40.0);
        assert_eq!(sample.humid, round_to(baseline(Channel::Humid, 123.4), 1));
    }

    #[test]
    fn overrides_are_rounded_to_channel_precision() {
        let mut generator = ReadingGenerator::seeded(3);
        let overrides = ManualOverrides::from_sentinels(38.004, 61.26);
        let sample = generator.generate(5.0, false, overrides);

        assert_eq!(sample.temp, 38.0);
        assert_eq!(sample.humid, 61.3);
    }

    #[test]
    fn sentinel_decoding() {
        let overrides = ManualOverrides::from_sentinels(-1.0, 0.0);
        assert_eq!(overrides.temp, None);
        assert_eq!(overrides.humid, Some(0.0));

        assert_eq!(ManualOverrides::from_sentinels(f64::NAN, -0.5), ManualOverrides::none());
    }
}
