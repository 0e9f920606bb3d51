//! Servo driver trait
//!
//! A positional servo is commanded by angle. The driver clamps the angle
//! into its configured range and converts it to a pulse width on a PWM
//! output. Nothing is rejected: out-of-range angles clamp.

use core::fmt;

use relaykit_hal::PwmError;

use crate::config::ServoConfig;

/// Errors that can occur with servo operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Moved before `setup` attached an output pin
    NotConfigured,
    /// The PWM output rejected an operation
    Pwm(PwmError),
}

impl From<PwmError> for ServoError {
    fn from(e: PwmError) -> Self {
        ServoError::Pwm(e)
    }
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::NotConfigured => write!(f, "servo not set up"),
            ServoError::Pwm(e) => write!(f, "servo output: {}", e),
        }
    }
}

/// Trait for angle-commanded servos
pub trait ServoDriver {
    /// Current configuration
    fn config(&self) -> &ServoConfig;

    /// Set the clamping range for subsequent moves
    fn set_angle_range(&mut self, min_angle: i32, max_angle: i32);

    /// Pulse width (µs) the driver would output for an angle
    fn pulse_width_for(&self, angle: i32) -> u16;

    /// Move to an angle, returning the pulse width written
    fn sweep(&mut self, angle: i32) -> Result<u16, ServoError>;

    /// Last pulse width written, if any
    fn last_pulse_width(&self) -> Option<u16>;

    /// Check if an output pin is attached
    fn is_configured(&self) -> bool;
}
