//! RP2040 PWM implementation
//!
//! Each actuator channel owns one PWM slice, clocked for 1 µs resolution
//! (125 MHz system clock / 125) with the wrap value derived from the
//! requested frame rate (50 Hz → 20 000 counts).

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::{PwmConfig, PwmInterface},
    Result,
};
use embassy_rp::pwm::{Config as SliceConfig, Pwm};
use fixed::traits::ToFixed;

/// Counter ticks per second after the divider (1 µs per tick)
const PWM_TICK_HZ: u32 = 1_000_000;

/// System clock to PWM tick divider (125 MHz / 125 = 1 MHz)
const PWM_CLOCK_DIV: u32 = 125;

/// PWM slice wrapper implementing [`PwmInterface`].
pub struct Rp2040Pwm<'d> {
    pwm: Pwm<'d>,
    slice_config: SliceConfig,
    duty_cycle: f32,
    enabled: bool,
}

impl<'d> Rp2040Pwm<'d> {
    /// Configure a slice for servo output.
    ///
    /// The `Pwm` is created by the caller from the concrete pin and slice
    /// peripherals (`Pwm::new_output_a(...)` / `new_output_b(...)`).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidFrequency)` if the
    /// requested frame rate does not fit the 16-bit counter at 1 µs
    /// resolution (anything below ~16 Hz).
    pub fn new(mut pwm: Pwm<'d>, config: PwmConfig) -> Result<Self> {
        let top = top_for(config.frequency)?;

        let mut slice_config = SliceConfig::default();
        slice_config.divider = PWM_CLOCK_DIV.to_fixed();
        slice_config.top = top;
        slice_config.enable = false;
        pwm.set_config(&slice_config);

        let mut out = Self {
            pwm,
            slice_config,
            duty_cycle: 0.0,
            enabled: false,
        };
        out.set_duty_cycle(config.duty_cycle)?;
        Ok(out)
    }
}

/// Wrap value for a frame rate at 1 µs resolution.
fn top_for(frequency: u32) -> Result<u16> {
    if frequency == 0 {
        return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
    }
    let counts = PWM_TICK_HZ / frequency;
    if counts == 0 || counts > u16::MAX as u32 + 1 {
        return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
    }
    Ok((counts - 1) as u16)
}

impl PwmInterface for Rp2040Pwm<'_> {
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }

        self.duty_cycle = duty_cycle;
        let counts = self.slice_config.top as u32 + 1;
        let compare = (duty_cycle * counts as f32) as u16;

        // Same compare on both slice outputs, so the wrapper works for a pin
        // on either channel A or B.
        self.slice_config.compare_a = compare;
        self.slice_config.compare_b = compare;
        self.pwm.set_config(&self.slice_config);

        Ok(())
    }

    fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    fn enable(&mut self) {
        self.slice_config.enable = true;
        self.pwm.set_config(&self.slice_config);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.slice_config.enable = false;
        self.pwm.set_config(&self.slice_config);
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
