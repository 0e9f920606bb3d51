//! Servo-driven mask
//!
//! A mask is a flap moved between two configured angles by an
//! [`AngleServo`]. The servo uses the default pulse bounds and angle range,
//! so open/close angles outside 0..=180 clamp.

use relaykit_core::config::{MaskConfig, MaskState};
use relaykit_core::traits::{ServoDriver, ServoError};
use relaykit_hal::PwmPin;

use crate::servo::AngleServo;

/// Mask driver
pub struct Mask<P> {
    config: MaskConfig,
    servo: AngleServo<P>,
    state: MaskState,
}

impl<P: PwmPin> Mask<P> {
    pub fn new(config: MaskConfig) -> Self {
        Self {
            config,
            servo: AngleServo::default(),
            state: MaskState::Unknown,
        }
    }

    /// Attach the servo output
    ///
    /// The mask stays in [`MaskState::Unknown`] until the first move.
    pub fn setup(&mut self, pin: P) -> Result<(), ServoError> {
        self.state = MaskState::Unknown;
        self.servo.setup_default(pin)
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn state(&self) -> MaskState {
        self.state
    }

    pub fn servo(&self) -> &AngleServo<P> {
        &self.servo
    }

    /// Move to the open angle
    pub fn open(&mut self) -> Result<u16, ServoError> {
        self.move_to(MaskState::Open, self.config.open_angle)
    }

    /// Move to the closed angle
    pub fn close(&mut self) -> Result<u16, ServoError> {
        self.move_to(MaskState::Closed, self.config.close_angle)
    }

    /// Close if open, otherwise open
    pub fn toggle(&mut self) -> Result<u16, ServoError> {
        match self.state {
            MaskState::Open => self.close(),
            MaskState::Closed | MaskState::Unknown => self.open(),
        }
    }

    /// Detach and return the servo output
    pub fn release(self) -> Option<P> {
        self.servo.release()
    }

    fn move_to(&mut self, target: MaskState, angle: i32) -> Result<u16, ServoError> {
        let pulse_us = self.servo.sweep(angle)?;
        self.state = target;
        Ok(pulse_us)
    }
}
