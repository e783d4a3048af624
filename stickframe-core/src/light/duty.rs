//! Stick deviation to light brightness

use crate::config::{DutyFormula, MAX_DUTY};
use crate::input::{AxisSample, DeadZone};
use crate::state::ModeFlags;
use crate::traits::LightChannel;

/// Half of the ADC span; deviation magnitude at full stick travel
const HALF_SPAN: i32 = 2048;

/// Duties for all three channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyFrame {
    pub red: u16,
    pub blue: u16,
    pub green: u16,
}

impl DutyFrame {
    /// All channels off
    pub const OFF: Self = Self {
        red: 0,
        blue: 0,
        green: 0,
    };

    /// The frame actually written to the outputs
    pub fn gated(self, pwm_enabled: bool) -> Self {
        if pwm_enabled {
            self
        } else {
            Self::OFF
        }
    }

    /// Duty of one channel
    pub fn channel(&self, channel: LightChannel) -> u16 {
        match channel {
            LightChannel::Red => self.red,
            LightChannel::Blue => self.blue,
            LightChannel::Green => self.green,
        }
    }
}

fn clamp_duty(value: i32) -> u16 {
    value.clamp(0, i32::from(MAX_DUTY)) as u16
}

/// Computes per-channel duty from stick samples
#[derive(Debug, Clone, Copy)]
pub struct DutyMapper {
    formula: DutyFormula,
    dead_zone: DeadZone,
}

impl DutyMapper {
    pub fn new(formula: DutyFormula, dead_zone: DeadZone) -> Self {
        Self { formula, dead_zone }
    }

    /// Duty for one axis-linked channel
    pub fn axis_duty(&self, deviation: i32) -> u16 {
        let max = i32::from(MAX_DUTY);
        match self.formula {
            DutyFormula::SignedOffset => {
                let offset = deviation.clamp(-HALF_SPAN, HALF_SPAN) + HALF_SPAN;
                clamp_duty(offset * max / (2 * HALF_SPAN))
            }
            DutyFormula::Magnitude => {
                let threshold = i32::from(self.dead_zone.threshold());
                let range = (HALF_SPAN - threshold).max(1);
                let past = (deviation.saturating_abs() - threshold).clamp(0, range);
                clamp_duty(past * max / range)
            }
        }
    }

    /// Ungated duties: red follows X, blue follows Y, green follows the
    /// toggle flag
    pub fn compute(&self, x: &AxisSample, y: &AxisSample, flags: ModeFlags) -> DutyFrame {
        DutyFrame {
            red: self.axis_duty(x.deviation),
            blue: self.axis_duty(y.deviation),
            green: if flags.toggle_on { MAX_DUTY } else { 0 },
        }
    }
}
