//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific driver implementations.

pub mod servo;

pub use servo::{ServoDriver, ServoError};
