//! Analog stick sampling and dead-zone filtering
//!
//! The sampler only reports deviation from the calibrated center. Whether a
//! deviation counts as input is up to each consumer, through [`DeadZone`].

use crate::config::{CalibrationConfig, ADC_MAX};
use crate::traits::{Axis, AxisInput};

/// One axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    /// Raw reading, clamped to `0..=ADC_MAX`
    pub raw: u16,
    /// Calibrated center the deviation is measured from
    pub center: u16,
    /// `raw - center`
    pub deviation: i32,
}

impl AxisSample {
    /// Build a sample from a raw reading, clamping it to the ADC range
    pub fn new(raw: u16, center: u16) -> Self {
        let raw = raw.min(ADC_MAX);
        Self {
            raw,
            center,
            deviation: i32::from(raw) - i32::from(center),
        }
    }
}

/// Band of deviation around center that is treated as "no input"
///
/// The boundary is exclusive: a deviation whose magnitude equals the
/// threshold is still inside the dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadZone {
    threshold: u16,
}

impl DeadZone {
    /// Create a dead zone of the given half-width
    pub const fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    /// Half-width of the band
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// True if `deviation` lies outside the band (the stick is deflected)
    pub fn is_active(&self, deviation: i32) -> bool {
        deviation.unsigned_abs() > u32::from(self.threshold)
    }
}

/// Reads both stick axes and centers them
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    center_x: u16,
    center_y: u16,
}

impl Sampler {
    /// Create a sampler for the given calibration
    pub fn new(calibration: &CalibrationConfig) -> Self {
        Self {
            center_x: calibration.center_x,
            center_y: calibration.center_y,
        }
    }

    /// Sample X then Y
    pub fn sample_axes<A: AxisInput>(&self, input: &mut A) -> (AxisSample, AxisSample) {
        let x = AxisSample::new(input.read_axis(Axis::X), self.center_x);
        let y = AxisSample::new(input.read_axis(Axis::Y), self.center_y);
        (x, y)
    }
}
