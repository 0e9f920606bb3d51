//! PWM slice output for servos
//!
//! Each RP2040 PWM slice has one 16-bit counter shared by channels A and B.
//! The counter runs at `SYS_CLK / divider` and wraps after `top + 1`
//! ticks, so the carrier is `SYS_CLK / (divider * (top + 1))`.
//!
//! For a duty range `r` we set `top = r - 1`, which makes the compare
//! value equal to the duty. The divider is an 8.4 fixed-point value.

use embassy_rp::pwm::{Config as SliceConfig, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;

use relaykit_hal::{PwmConfig, PwmError, PwmPin};

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Smallest divider, 1.0 in 8.4 fixed point
const DIVIDER_MIN_X16: u64 = 16;

/// Largest divider, 255 + 15/16 in 8.4 fixed point
const DIVIDER_MAX_X16: u64 = 0xFFF;

/// Calculate divider and top for a carrier
///
/// Returns `(divider_x16, top)` where `divider_x16` is the divider in
/// sixteenths.
pub fn calc_slice_timing(sys_clk_hz: u32, config: PwmConfig) -> Result<(u16, u16), PwmError> {
    config.validate()?;

    let ticks_per_second = config.frequency_hz as u64 * config.range as u64;
    let divider_x16 = (sys_clk_hz as u64 * 16) / ticks_per_second;
    if !(DIVIDER_MIN_X16..=DIVIDER_MAX_X16).contains(&divider_x16) {
        return Err(PwmError::InvalidFrequency);
    }

    Ok((divider_x16 as u16, config.range - 1))
}

/// Servo output on channel A of a PWM slice
pub struct ServoPwm<'d> {
    pwm: Pwm<'d>,
    pin: u8,
    slice: SliceConfig,
    range: Option<u16>,
}

impl<'d> ServoPwm<'d> {
    /// Wrap a slice created with `Pwm::new_output_a`
    ///
    /// `pin` is the GPIO number routed to channel A.
    pub fn new(pwm: Pwm<'d>, pin: u8) -> Self {
        Self {
            pwm,
            pin,
            slice: SliceConfig::default(),
            range: None,
        }
    }

    fn apply(&mut self) {
        self.pwm.set_config(&self.slice);
    }
}

impl PwmPin for ServoPwm<'_> {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn configure_output(&mut self) -> Result<(), PwmError> {
        // Drive low until the first duty is written
        self.slice.compare_a = 0;
        self.slice.enable = true;
        self.apply();
        Ok(())
    }

    fn configure(&mut self, config: PwmConfig) -> Result<(), PwmError> {
        let (divider_x16, top) = calc_slice_timing(SYS_CLK_HZ, config)?;

        self.slice.divider = FixedU16::<U4>::from_bits(divider_x16);
        self.slice.top = top;
        self.slice.compare_a = 0;
        self.slice.enable = true;
        self.apply();

        self.range = Some(config.range);
        Ok(())
    }

    fn write_duty(&mut self, duty: u16) -> Result<(), PwmError> {
        let range = self.range.ok_or(PwmError::NotConfigured)?;
        if duty > range {
            return Err(PwmError::DutyOutOfRange);
        }

        self.slice.compare_a = duty;
        self.apply();
        Ok(())
    }
}
