//! Simulated Channel Profiles
//!
//! Each simulated channel follows `center + amplitude * sin(omega * t)` where
//! `t` is simulated time in seconds, optionally perturbed by uniform noise in
//! `[-noise_bound, noise_bound]`, then rounded to `decimals` places.
//!
//! The default thresholds describe the safe operating range of an infant
//! incubator and are what a fresh [`ThresholdStore`](crate::thresholds::ThresholdStore)
//! is populated with.

/// Waveform, noise, rounding and default safe range for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelProfile {
    /// Baseline the sinusoid oscillates around
    pub center: f64,
    /// Peak deviation of the sinusoid from `center`
    pub amplitude: f64,
    /// Angular frequency in radians per simulated second
    pub omega: f64,
    /// Half-width of the uniform jitter added when noise is enabled
    pub noise_bound: f64,
    /// Decimal places kept after rounding (0 for integer channels)
    pub decimals: u32,
    /// Default lower bound of the safe range
    pub default_min: f64,
    /// Default upper bound of the safe range
    pub default_max: f64,
}

// ===== TEMPERATURE =====

/// Air temperature (°C).
pub const TEMP: ChannelProfile = ChannelProfile {
    center: 37.0,
    amplitude: 0.3,
    omega: 0.05,
    noise_bound: 0.2,
    decimals: 2,
    default_min: 36.0,
    default_max: 38.0,
};

// ===== HUMIDITY =====

/// Relative humidity (%).
pub const HUMID: ChannelProfile = ChannelProfile {
    center: 60.0,
    amplitude: 5.0,
    omega: 0.03,
    noise_bound: 2.0,
    decimals: 1,
    default_min: 50.0,
    default_max: 70.0,
};

// ===== GASES =====

/// Oxygen concentration (%).
pub const O2: ChannelProfile = ChannelProfile {
    center: 21.0,
    amplitude: 0.5,
    omega: 0.02,
    noise_bound: 0.3,
    decimals: 2,
    default_min: 19.0,
    default_max: 25.0,
};

/// Carbon dioxide concentration (%).
pub const CO2: ChannelProfile = ChannelProfile {
    center: 0.04,
    amplitude: 0.01,
    omega: 0.01,
    noise_bound: 0.005,
    decimals: 3,
    default_min: 0.03,
    default_max: 0.06,
};

// ===== FAN =====

/// Fan speed (% of maximum), reported as an integer.
pub const FAN: ChannelProfile = ChannelProfile {
    center: 50.0,
    amplitude: 10.0,
    omega: 0.02,
    noise_bound: 5.0,
    decimals: 0,
    default_min: 0.0,
    default_max: 100.0,
};

const _: () = assert!(TEMP.default_min <= TEMP.default_max);
const _: () = assert!(HUMID.default_min <= HUMID.default_max);
const _: () = assert!(O2.default_min <= O2.default_max);
const _: () = assert!(CO2.default_min <= CO2.default_max);
const _: () = assert!(FAN.default_min <= FAN.default_max);
