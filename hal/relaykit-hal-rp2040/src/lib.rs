//! RP2040-specific HAL for relaykit firmware
//!
//! This crate provides RP2040 implementations of the shared `relaykit-hal`
//! traits:
//!
//! - Servo PWM output on one channel of a PWM slice
//! - Blocking UART console

#![no_std]

pub mod pwm;
pub mod uart;

pub use pwm::ServoPwm;
pub use uart::{console, RpConsole};
