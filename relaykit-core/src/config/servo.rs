//! Servo and mask configuration types
//!
//! With the `serde` feature these serialize to postcard binary for storage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum pulse width in microseconds
pub const DEFAULT_MIN_PULSE_US: u16 = 500;

/// Default maximum pulse width in microseconds
pub const DEFAULT_MAX_PULSE_US: u16 = 2400;

/// Default minimum angle in degrees
pub const DEFAULT_MIN_ANGLE: i32 = 0;

/// Default maximum angle in degrees
pub const DEFAULT_MAX_ANGLE: i32 = 180;

/// Longest pulse that fits a 50 Hz period
pub const MAX_PULSE_US: u16 = 20_000;

/// Largest postcard encoding of a [`ServoConfig`] or [`MaskConfig`]
pub const MAX_ENCODED_SIZE: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Minimum pulse is not below maximum pulse
    PulseRange,
    /// Maximum pulse is longer than the PWM period
    PulseTooLong,
    /// Minimum angle is not below maximum angle
    AngleRange,
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
}

/// Per-servo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// GPIO pin driving the servo signal
    pub pin: u8,
    /// Pulse width at angle 0 (µs)
    pub min_pulse_us: u16,
    /// Pulse width at angle 180 (µs)
    pub max_pulse_us: u16,
    /// Lowest commanded angle (degrees)
    pub min_angle: i32,
    /// Highest commanded angle (degrees)
    pub max_angle: i32,
}

impl ServoConfig {
    /// Config with the given pulse bounds and the default angle range
    pub const fn new(min_pulse_us: u16, max_pulse_us: u16) -> Self {
        Self {
            pin: 0,
            min_pulse_us,
            max_pulse_us,
            min_angle: DEFAULT_MIN_ANGLE,
            max_angle: DEFAULT_MAX_ANGLE,
        }
    }

    /// Check the range invariants
    ///
    /// The servo driver accepts invalid configs and maps them anyway; this
    /// is for callers that want to reject them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pulse_us >= self.max_pulse_us {
            return Err(ConfigError::PulseRange);
        }
        if self.max_pulse_us > MAX_PULSE_US {
            return Err(ConfigError::PulseTooLong);
        }
        if self.min_angle >= self.max_angle {
            return Err(ConfigError::AngleRange);
        }
        Ok(())
    }

    /// Clamp an angle into the configured range
    ///
    /// Lower bound first, so an inverted range yields `min_angle`.
    pub fn clamp_angle(&self, angle: i32) -> i32 {
        if angle < self.min_angle {
            self.min_angle
        } else if angle > self.max_angle {
            self.max_angle
        } else {
            angle
        }
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PULSE_US, DEFAULT_MAX_PULSE_US)
    }
}

/// State a mask can be commanded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaskState {
    /// Not moved since setup
    #[default]
    Unknown,
    Open,
    Closed,
}

/// Servo-driven mask (flap) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskConfig {
    /// GPIO pin driving the servo signal
    pub pin: u8,
    /// Angle of the open position (degrees)
    pub open_angle: i32,
    /// Angle of the closed position (degrees)
    pub close_angle: i32,
}

impl MaskConfig {
    pub const fn new(pin: u8, open_angle: i32, close_angle: i32) -> Self {
        Self {
            pin,
            open_angle,
            close_angle,
        }
    }

    /// Target angle for a state, `None` for [`MaskState::Unknown`]
    pub fn angle_for(&self, state: MaskState) -> Option<i32> {
        match state {
            MaskState::Open => Some(self.open_angle),
            MaskState::Closed => Some(self.close_angle),
            MaskState::Unknown => None,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::new(0, DEFAULT_MAX_ANGLE, DEFAULT_MIN_ANGLE)
    }
}

#[cfg(feature = "serde")]
macro_rules! postcard_codec {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Serialize to postcard into `buf`, returning the used prefix
                pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
                    postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
                }

                /// Deserialize from postcard
                pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
                    postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
                }
            }
        )*
    };
}

#[cfg(feature = "serde")]
postcard_codec!(ServoConfig, MaskConfig);
