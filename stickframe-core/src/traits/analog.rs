//! Analog stick sampling trait

/// Input axis of the analog stick
///
/// Named after the stick's own ADC wiring, not the screen. The screen
/// orientation is rotated relative to the stick; see
/// [`PositionMapper`](crate::motion::PositionMapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal stick axis (ADC0 on the reference board)
    X,
    /// Vertical stick axis (ADC1 on the reference board)
    Y,
}

/// Source of raw 12-bit axis samples
///
/// Implementations never fail: a board that cannot read its ADC must
/// report a value that the pipeline treats as "no input" (the calibrated
/// center). Values above 4095 are tolerated and clamped by the sampler.
pub trait AxisInput {
    /// Read one raw sample from the given axis
    fn read_axis(&mut self, axis: Axis) -> u16;
}
