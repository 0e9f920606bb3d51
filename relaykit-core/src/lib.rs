//! Board-agnostic core logic for relaykit firmware
//!
//! This crate contains the application helpers that do not depend on a
//! specific chip:
//!
//! - Gated debug console output ([`log::DebugLog`])
//! - Separator-delimited byte list parsing ([`parse`])
//! - Servo and mask configuration types ([`config`])
//! - Servo driver trait ([`traits::ServoDriver`])

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod log;
pub mod parse;
pub mod traits;
