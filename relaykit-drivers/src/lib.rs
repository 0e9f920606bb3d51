//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in relaykit-core on top of the relaykit-hal capabilities:
//!
//! - Angle servo on a 50 Hz PWM output
//! - Servo-driven mask with open/closed positions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod mask;
pub mod servo;

#[cfg(test)]
mod mock;

pub use mask::Mask;
pub use servo::AngleServo;
