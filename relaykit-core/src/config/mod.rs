//! Configuration types
//!
//! Board-agnostic configuration structures, optionally stored as postcard
//! binary data.

pub mod servo;

pub use servo::*;
