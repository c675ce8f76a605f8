//! Actuator output channels
//!
//! Thin layer between the control core and the PWM hardware: takes an
//! [`ActuatorCommand`] in pulse-width microseconds and writes the equivalent
//! duty-cycle fraction to each of the four channels. Hardware timing and
//! units live below the [`PwmInterface`] seam; pulse arithmetic lives above
//! it in the mapper.

use crate::control::mapper::ActuatorCommand;
use crate::platform::traits::pwm::PwmInterface;

/// Servo frame period at 50 Hz
const PERIOD_US: f32 = 20_000.0;

/// Convert a pulse width to a PWM duty-cycle fraction.
///
/// For the 50 Hz / 20 ms servo frame:
/// - 1000 µs = 5.0%
/// - 1500 µs = 7.5%
/// - 2000 µs = 10.0%
pub fn pulse_to_duty_cycle(pulse_us: u16) -> f32 {
    pulse_us as f32 / PERIOD_US
}

/// Inverse of [`pulse_to_duty_cycle`].
pub fn duty_cycle_to_pulse(duty: f32) -> u16 {
    (duty * PERIOD_US + 0.5) as u16
}

/// The four control-surface/ESC output channels.
///
/// Owned exclusively by the control loop; channels are borrowed mutably for
/// the loop's lifetime so no other writer can exist.
pub struct RcActuators<'a> {
    roll: &'a mut dyn PwmInterface,
    pitch: &'a mut dyn PwmInterface,
    yaw: &'a mut dyn PwmInterface,
    throttle: &'a mut dyn PwmInterface,
}

impl<'a> RcActuators<'a> {
    /// Bundle the four output channels.
    pub fn new(
        roll: &'a mut dyn PwmInterface,
        pitch: &'a mut dyn PwmInterface,
        yaw: &'a mut dyn PwmInterface,
        throttle: &'a mut dyn PwmInterface,
    ) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            throttle,
        }
    }

    /// Write one command to all four channels.
    ///
    /// Repeating the same command is harmless; each write is an absolute
    /// duty value, not an increment.
    pub fn apply(&mut self, cmd: &ActuatorCommand) -> Result<(), &'static str> {
        self.roll
            .set_duty_cycle(pulse_to_duty_cycle(cmd.roll))
            .map_err(|_| "roll PWM write failed")?;
        self.pitch
            .set_duty_cycle(pulse_to_duty_cycle(cmd.pitch))
            .map_err(|_| "pitch PWM write failed")?;
        self.yaw
            .set_duty_cycle(pulse_to_duty_cycle(cmd.yaw))
            .map_err(|_| "yaw PWM write failed")?;
        self.throttle
            .set_duty_cycle(pulse_to_duty_cycle(cmd.throttle))
            .map_err(|_| "throttle PWM write failed")?;
        Ok(())
    }

    /// Enable all four outputs.
    pub fn enable(&mut self) {
        self.roll.enable();
        self.pitch.enable();
        self.yaw.enable();
        self.throttle.enable();
    }
}
