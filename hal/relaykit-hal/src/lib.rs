//! relaykit Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the relaykit drivers consume.
//! Chip-specific HALs implement them, and host tests implement them with
//! recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (relaykit-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐   ┌─────────────────────┐
//! │ relaykit-core   │   │ relaykit-drivers    │
//! └─────────────────┘   └─────────────────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  relaykit-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ relaykit-hal-   │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pwm::PwmPin`] - Fixed-frequency PWM output with a duty register
//! - [`uart::UartTx`] - Serial console sink

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use pwm::{PwmConfig, PwmError, PwmPin};
pub use uart::{Console, UartConfig, UartTx};
