//! Platform abstraction traits

pub mod pwm;

pub use pwm::{PwmConfig, PwmInterface};
