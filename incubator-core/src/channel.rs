//! Simulated sensor channels
//!
//! The five channels are always handled in the fixed order
//! TEMP, HUMID, O2, CO2, FAN. Alarm text, CSV columns and trend snapshots all
//! follow [`Channel::ALL`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::channels::{self, ChannelProfile};
use crate::errors::ConfigError;

/// One simulated incubator sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Channel {
    /// Temperature, °C
    Temp = 0,
    /// Relative humidity, %
    Humid = 1,
    /// Oxygen concentration, %
    O2 = 2,
    /// Carbon dioxide concentration, %
    Co2 = 3,
    /// Fan speed, % of maximum
    Fan = 4,
}

impl Channel {
    /// Number of channels
    pub const COUNT: usize = 5;

    /// All channels in evaluation and export order
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Temp,
        Channel::Humid,
        Channel::O2,
        Channel::Co2,
        Channel::Fan,
    ];

    /// Parameter name as used in alarm text and CSV headers
    pub const fn name(&self) -> &'static str {
        match self {
            Channel::Temp => "TEMP",
            Channel::Humid => "HUMID",
            Channel::O2 => "O2",
            Channel::Co2 => "CO2",
            Channel::Fan => "FAN",
        }
    }

    /// Unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Channel::Temp => "°C",
            Channel::Humid | Channel::O2 | Channel::Co2 | Channel::Fan => "%",
        }
    }

    /// Waveform and default-range profile for this channel
    pub const fn profile(&self) -> &'static ChannelProfile {
        match self {
            Channel::Temp => &channels::TEMP,
            Channel::Humid => &channels::HUMID,
            Channel::O2 => &channels::O2,
            Channel::Co2 => &channels::CO2,
            Channel::Fan => &channels::FAN,
        }
    }

    /// Position in [`Channel::ALL`]
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownChannel(s.to_string()))
    }
}
