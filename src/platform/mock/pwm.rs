//! Mock PWM implementation for testing
//!
//! Tracks the last commanded duty cycle plus a write counter, so tests can
//! verify both the value an actuator channel ended up at and that coasting
//! ticks produce no redundant writes.

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::{PwmConfig, PwmInterface},
    Result,
};

/// Mock PWM channel
#[derive(Debug)]
pub struct MockPwm {
    duty_cycle: f32,
    enabled: bool,
    writes: usize,
}

impl MockPwm {
    /// Create a new mock channel.
    pub fn new(config: PwmConfig) -> Self {
        Self {
            duty_cycle: config.duty_cycle,
            enabled: false,
            writes: 0,
        }
    }

    /// Number of `set_duty_cycle` calls accepted so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Last commanded output expressed as a pulse width in microseconds
    /// (assuming the standard 50 Hz / 20 ms servo frame).
    pub fn pulse_us(&self) -> u16 {
        crate::libraries::srv_channel::duty_cycle_to_pulse(self.duty_cycle)
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new(PwmConfig::default())
    }
}

impl PwmInterface for MockPwm {
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }
        self.duty_cycle = duty_cycle;
        self.writes += 1;
        Ok(())
    }

    fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pwm_duty_cycle() {
        let mut pwm = MockPwm::default();
        assert_eq!(pwm.duty_cycle(), 0.0);

        pwm.set_duty_cycle(0.075).unwrap();
        assert_eq!(pwm.duty_cycle(), 0.075);
        assert_eq!(pwm.pulse_us(), 1500);

        assert!(pwm.set_duty_cycle(-0.1).is_err());
        assert!(pwm.set_duty_cycle(1.1).is_err());
    }

    #[test]
    fn test_mock_pwm_counts_writes() {
        let mut pwm = MockPwm::default();
        assert_eq!(pwm.write_count(), 0);

        pwm.set_duty_cycle(0.05).unwrap();
        pwm.set_duty_cycle(0.10).unwrap();
        assert_eq!(pwm.write_count(), 2);

        // Rejected writes are not counted
        let _ = pwm.set_duty_cycle(2.0);
        assert_eq!(pwm.write_count(), 2);
    }

    #[test]
    fn test_mock_pwm_enable() {
        let mut pwm = MockPwm::default();
        assert!(!pwm.is_enabled());

        pwm.enable();
        assert!(pwm.is_enabled());

        pwm.disable();
        assert!(!pwm.is_enabled());
    }
}
