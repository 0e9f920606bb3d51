//! Servo driver implementations
//!
//! - Angle servos: clamp an angle and map it to a pulse width in µs

pub mod angle;

pub use angle::AngleServo;
