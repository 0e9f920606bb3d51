//! Mock PWM output for driver tests
//!
//! Records configuration calls and every duty written.

use relaykit_hal::{PwmConfig, PwmError, PwmPin};

#[derive(Debug, Default)]
pub struct MockPwm {
    pin: u8,
    pub output: bool,
    pub config: Option<PwmConfig>,
    pub duties: Vec<u16>,
    /// Error returned by the next `write_duty`
    pub reject: Option<PwmError>,
}

impl MockPwm {
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            ..Default::default()
        }
    }

    pub fn last_duty(&self) -> Option<u16> {
        self.duties.last().copied()
    }
}

impl PwmPin for MockPwm {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn configure_output(&mut self) -> Result<(), PwmError> {
        self.output = true;
        Ok(())
    }

    fn configure(&mut self, config: PwmConfig) -> Result<(), PwmError> {
        config.validate()?;
        self.config = Some(config);
        Ok(())
    }

    fn write_duty(&mut self, duty: u16) -> Result<(), PwmError> {
        if let Some(e) = self.reject.take() {
            return Err(e);
        }
        let config = self.config.ok_or(PwmError::NotConfigured)?;
        if duty > config.range {
            return Err(PwmError::DutyOutOfRange);
        }
        self.duties.push(duty);
        Ok(())
    }
}
