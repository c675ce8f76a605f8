//! Mock platform implementations for host testing

pub mod pwm;

pub use pwm::MockPwm;
