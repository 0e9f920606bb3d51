//! Angle servo driver on a 50 Hz PWM output
//!
//! The driver configures its pin for a 50 Hz carrier with a duty range of
//! 20000, so a duty value is a pulse width in microseconds.
//!
//! On every move the commanded angle is clamped into the configured angle
//! range and then mapped from the fixed domain `[0, 180]` onto
//! `[min_pulse_us, max_pulse_us]` with truncating integer division. The
//! mapping domain does not follow `set_angle_range`: a custom range only
//! narrows which angles are reachable.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = AngleServo::default();
//! servo.setup_default(pwm)?;
//! servo.set_angle_range(0, 180);
//! servo.sweep(90)?; // 1450 µs
//! ```

use relaykit_core::config::{ServoConfig, DEFAULT_MAX_ANGLE, DEFAULT_MIN_ANGLE};
use relaykit_core::config::{DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US};
use relaykit_core::traits::{ServoDriver, ServoError};
use relaykit_hal::pwm::SERVO_DUTY_RANGE;
use relaykit_hal::{PwmConfig, PwmPin};

/// Lower end of the angle-to-pulse mapping domain
const MAP_DOMAIN_MIN: i64 = 0;

/// Upper end of the angle-to-pulse mapping domain
const MAP_DOMAIN_MAX: i64 = 180;

/// Servo driven by pulse width on a PWM pin
pub struct AngleServo<P> {
    config: ServoConfig,
    pin: Option<P>,
    last_pulse_us: Option<u16>,
}

impl<P> Default for AngleServo<P> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PULSE_US, DEFAULT_MAX_PULSE_US)
    }
}

impl<P> AngleServo<P> {
    /// Create a servo with the given pulse bounds
    ///
    /// No hardware is touched until [`setup`](Self::setup).
    pub fn new(min_pulse_us: u16, max_pulse_us: u16) -> Self {
        Self {
            config: ServoConfig::new(min_pulse_us, max_pulse_us),
            pin: None,
            last_pulse_us: None,
        }
    }

    /// Restore the default 0..=180 angle range
    pub fn reset_angle_range(&mut self) {
        self.config.min_angle = DEFAULT_MIN_ANGLE;
        self.config.max_angle = DEFAULT_MAX_ANGLE;
    }

    /// The attached output, if any
    pub fn pin(&self) -> Option<&P> {
        self.pin.as_ref()
    }

    /// Detach and return the output
    pub fn release(self) -> Option<P> {
        self.pin
    }
}

impl<P: PwmPin> AngleServo<P> {
    /// Attach an output and configure it for servo pulses
    ///
    /// Stores the pin and pulse bounds, switches the pin to output mode and
    /// sets the PWM generator to 50 Hz with 1 µs duty units. Call once,
    /// before the first move. If the hardware rejects the configuration the
    /// pin stays attached and the error is returned.
    pub fn setup(
        &mut self,
        pin: P,
        min_pulse_us: u16,
        max_pulse_us: u16,
    ) -> Result<(), ServoError> {
        self.config.pin = pin.pin();
        self.config.min_pulse_us = min_pulse_us;
        self.config.max_pulse_us = max_pulse_us;
        self.last_pulse_us = None;

        let pin = self.pin.insert(pin);
        pin.configure_output()?;
        pin.configure(PwmConfig::servo())?;
        Ok(())
    }

    /// [`setup`](Self::setup) with the default 500..=2400 µs pulse bounds
    pub fn setup_default(&mut self, pin: P) -> Result<(), ServoError> {
        self.setup(pin, DEFAULT_MIN_PULSE_US, DEFAULT_MAX_PULSE_US)
    }

    fn map_to_pulse(&self, angle: i32) -> i64 {
        let out_min = self.config.min_pulse_us as i64;
        let out_max = self.config.max_pulse_us as i64;
        (angle as i64 - MAP_DOMAIN_MIN) * (out_max - out_min) / (MAP_DOMAIN_MAX - MAP_DOMAIN_MIN)
            + out_min
    }
}

impl<P: PwmPin> ServoDriver for AngleServo<P> {
    fn config(&self) -> &ServoConfig {
        &self.config
    }

    fn set_angle_range(&mut self, min_angle: i32, max_angle: i32) {
        self.config.min_angle = min_angle;
        self.config.max_angle = max_angle;
    }

    fn pulse_width_for(&self, angle: i32) -> u16 {
        let bounded = self.config.clamp_angle(angle);
        // Saturate into the duty register's range
        self.map_to_pulse(bounded).clamp(0, SERVO_DUTY_RANGE as i64) as u16
    }

    fn sweep(&mut self, angle: i32) -> Result<u16, ServoError> {
        let pulse_us = self.pulse_width_for(angle);
        let pin = self.pin.as_mut().ok_or(ServoError::NotConfigured)?;
        pin.write_duty(pulse_us)?;
        self.last_pulse_us = Some(pulse_us);
        Ok(pulse_us)
    }

    fn last_pulse_width(&self) -> Option<u16> {
        self.last_pulse_us
    }

    fn is_configured(&self) -> bool {
        self.pin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPwm;
    use proptest::prelude::*;
    use relaykit_hal::PwmError;

    fn ready_servo() -> AngleServo<MockPwm> {
        let mut servo = AngleServo::default();
        servo.setup_default(MockPwm::new(16)).unwrap();
        servo
    }

    #[test]
    fn test_new_touches_nothing() {
        let servo: AngleServo<MockPwm> = AngleServo::new(600, 2200);
        assert!(!servo.is_configured());
        assert_eq!(servo.config().min_pulse_us, 600);
        assert_eq!(servo.config().max_pulse_us, 2200);
        assert_eq!(servo.config().min_angle, 0);
        assert_eq!(servo.config().max_angle, 180);
        assert_eq!(servo.last_pulse_width(), None);
    }

    #[test]
    fn test_setup_configures_output() {
        let mut servo = AngleServo::new(1000, 2000);
        servo.setup(MockPwm::new(4), 500, 2400).unwrap();

        assert!(servo.is_configured());
        assert_eq!(servo.config().pin, 4);
        // setup bounds replace the constructor's
        assert_eq!(servo.config().min_pulse_us, 500);
        assert_eq!(servo.config().max_pulse_us, 2400);

        let pwm = servo.pin().unwrap();
        assert!(pwm.output);
        assert_eq!(
            pwm.config,
            Some(PwmConfig {
                frequency_hz: 50,
                range: 20_000
            })
        );
        assert!(pwm.duties.is_empty());
    }

    #[test]
    fn test_default_mapping() {
        let mut servo = ready_servo();
        assert_eq!(servo.sweep(0), Ok(500));
        assert_eq!(servo.sweep(180), Ok(2400));
        assert_eq!(servo.sweep(90), Ok(1450));

        let pwm = servo.release().unwrap();
        assert_eq!(pwm.duties, vec![500, 2400, 1450]);
    }

    #[test]
    fn test_truncating_division() {
        let servo = ready_servo();
        // 1 * 1900 / 180 = 10.55..
        assert_eq!(servo.pulse_width_for(1), 510);
        // 179 * 1900 / 180 = 1889.44..
        assert_eq!(servo.pulse_width_for(179), 2389);
    }

    #[test]
    fn test_inverted_pulse_bounds_truncate_toward_zero() {
        let mut servo = AngleServo::default();
        servo.setup(MockPwm::new(2), 2400, 500).unwrap();
        // 1 * -1900 / 180 = -10.55.. -> -10
        assert_eq!(servo.pulse_width_for(1), 2390);
        assert_eq!(servo.pulse_width_for(90), 1450);
        assert_eq!(servo.pulse_width_for(180), 500);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let mut servo = ready_servo();
        assert_eq!(servo.sweep(-45), Ok(500));
        assert_eq!(servo.sweep(i32::MIN), Ok(500));
        assert_eq!(servo.sweep(270), Ok(2400));
        assert_eq!(servo.sweep(i32::MAX), Ok(2400));
    }

    #[test]
    fn test_custom_range_keeps_fixed_domain() {
        let mut servo = ready_servo();
        servo.set_angle_range(45, 135);

        // Clamped to 45, then mapped as 45 on the 0..180 domain
        assert_eq!(servo.sweep(0), Ok(975));
        assert_eq!(servo.sweep(45), Ok(975));
        assert_eq!(servo.sweep(90), Ok(1450));
        assert_eq!(servo.sweep(200), Ok(1925));

        servo.reset_angle_range();
        assert_eq!(servo.sweep(0), Ok(500));
    }

    #[test]
    fn test_range_beyond_domain_saturates_duty() {
        let mut servo = ready_servo();
        servo.set_angle_range(-3600, 3600);
        assert_eq!(servo.pulse_width_for(-360), 0);
        assert_eq!(servo.pulse_width_for(-90), 0);
        // 3600 * 1900 / 180 + 500 = 38500
        assert_eq!(servo.pulse_width_for(3600), 20_000);
        assert_eq!(servo.sweep(270), Ok(3350));
    }

    #[test]
    fn test_sweep_before_setup() {
        let mut servo: AngleServo<MockPwm> = AngleServo::default();
        assert_eq!(servo.sweep(90), Err(ServoError::NotConfigured));
        assert_eq!(servo.last_pulse_width(), None);
        // The mapping itself does not need hardware
        assert_eq!(servo.pulse_width_for(90), 1450);
    }

    #[test]
    fn test_pwm_error_propagates() {
        let mut servo = ready_servo();
        servo.sweep(10).unwrap();
        let last = servo.last_pulse_width();

        servo.pin.as_mut().unwrap().reject = Some(PwmError::DutyOutOfRange);
        assert_eq!(
            servo.sweep(20),
            Err(ServoError::Pwm(PwmError::DutyOutOfRange))
        );
        assert_eq!(servo.last_pulse_width(), last);
    }

    #[test]
    fn test_last_pulse_width() {
        let mut servo = ready_servo();
        assert_eq!(servo.last_pulse_width(), None);
        servo.sweep(180).unwrap();
        assert_eq!(servo.last_pulse_width(), Some(2400));
    }

    proptest! {
        #[test]
        fn prop_below_min_matches_min(
            min in -90i32..90,
            span in 1i32..180,
            below in 1i32..10_000,
        ) {
            let mut servo = ready_servo();
            servo.set_angle_range(min, min + span);
            prop_assert_eq!(servo.sweep(min - below), servo.sweep(min));
        }

        #[test]
        fn prop_above_max_matches_max(
            min in -90i32..90,
            span in 1i32..180,
            above in 1i32..10_000,
        ) {
            let mut servo = ready_servo();
            let max = min + span;
            servo.set_angle_range(min, max);
            prop_assert_eq!(servo.sweep(max + above), servo.sweep(max));
        }

        #[test]
        fn prop_default_range_stays_within_pulse_bounds(angle in any::<i32>()) {
            let servo = ready_servo();
            let pulse = servo.pulse_width_for(angle);
            prop_assert!((500..=2400).contains(&pulse));
        }
    }
}
