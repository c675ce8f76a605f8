//! PWM output interface
//!
//! Servo and ESC channels are driven as duty-cycle fractions of a fixed-rate
//! PWM frame; the conversion from pulse width to duty fraction happens in the
//! actuator layer, hardware timing (clock divider, wrap value) is owned by
//! the platform implementation.

use crate::platform::Result;

/// PWM channel configuration
#[derive(Debug, Clone, Copy)]
pub struct PwmConfig {
    /// PWM frequency in Hz
    pub frequency: u32,
    /// Initial duty cycle (0.0 = 0%, 1.0 = 100%)
    pub duty_cycle: f32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency: crate::config::SERVO_PWM_HZ,
            duty_cycle: 0.0,
        }
    }
}

/// PWM output channel.
///
/// # Invariants
///
/// - One owner per channel; no concurrent access from multiple contexts.
/// - Duty cycle is a fraction in [0.0, 1.0].
pub trait PwmInterface {
    /// Set the duty cycle.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidDutyCycle)` if
    /// `duty_cycle` is outside [0.0, 1.0].
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()>;

    /// Current duty cycle as a fraction.
    fn duty_cycle(&self) -> f32;

    /// Enable the output.
    fn enable(&mut self);

    /// Disable the output.
    fn disable(&mut self);

    /// Whether the output is enabled.
    fn is_enabled(&self) -> bool;
}
