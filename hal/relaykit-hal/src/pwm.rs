//! PWM output abstractions
//!
//! A [`PwmPin`] is a single output pin driven by a PWM generator. The
//! generator runs at a fixed carrier frequency and accepts an integer duty
//! value on a configurable scale (the "range"). With a 50 Hz carrier and a
//! range of 20000, one duty unit is one microsecond of high time.

use core::fmt;

/// Standard hobby servo carrier frequency
pub const SERVO_FREQUENCY_HZ: u32 = 50;

/// Duty range giving one unit per microsecond at 50 Hz (20 ms period)
pub const SERVO_DUTY_RANGE: u16 = 20_000;

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Carrier frequency is zero or not reachable by the generator
    InvalidFrequency,
    /// Duty range is zero or exceeds the generator's counter
    InvalidRange,
    /// Duty value is larger than the configured range
    DutyOutOfRange,
    /// Duty written before the generator was configured
    NotConfigured,
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmError::InvalidFrequency => write!(f, "invalid PWM frequency"),
            PwmError::InvalidRange => write!(f, "invalid PWM duty range"),
            PwmError::DutyOutOfRange => write!(f, "PWM duty out of range"),
            PwmError::NotConfigured => write!(f, "PWM not configured"),
        }
    }
}

/// PWM generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Carrier frequency in Hz
    pub frequency_hz: u32,
    /// Duty scale: a duty of `range` is 100% high
    pub range: u16,
}

impl PwmConfig {
    /// Servo carrier: 50 Hz, 1 duty unit = 1 µs
    pub const fn servo() -> Self {
        Self {
            frequency_hz: SERVO_FREQUENCY_HZ,
            range: SERVO_DUTY_RANGE,
        }
    }

    /// Carrier period in microseconds
    pub const fn period_us(&self) -> u32 {
        if self.frequency_hz == 0 {
            0
        } else {
            1_000_000 / self.frequency_hz
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), PwmError> {
        if self.frequency_hz == 0 {
            return Err(PwmError::InvalidFrequency);
        }
        if self.range == 0 {
            return Err(PwmError::InvalidRange);
        }
        Ok(())
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::servo()
    }
}

/// Single PWM output pin
///
/// Implementations own the pin and its PWM channel. Calls are expected in
/// the order `configure_output`, `configure`, then any number of
/// `write_duty`.
pub trait PwmPin {
    /// GPIO number of the output pin
    fn pin(&self) -> u8;

    /// Put the pin in digital output mode
    fn configure_output(&mut self) -> Result<(), PwmError>;

    /// Set carrier frequency and duty range
    fn configure(&mut self, config: PwmConfig) -> Result<(), PwmError>;

    /// Write a duty value in `0..=range`
    fn write_duty(&mut self, duty: u16) -> Result<(), PwmError>;
}

impl<T: PwmPin + ?Sized> PwmPin for &mut T {
    fn pin(&self) -> u8 {
        (**self).pin()
    }

    fn configure_output(&mut self) -> Result<(), PwmError> {
        (**self).configure_output()
    }

    fn configure(&mut self, config: PwmConfig) -> Result<(), PwmError> {
        (**self).configure(config)
    }

    fn write_duty(&mut self, duty: u16) -> Result<(), PwmError> {
        (**self).write_duty(duty)
    }
}
