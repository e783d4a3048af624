//! Configuration type definitions
//!
//! These types describe one controller profile. The source program came in
//! several near-identical variants; every axis on which they differed is a
//! field here instead of a separate build.

use heapless::Vec;

use crate::render::BorderStyle;

/// Largest value the 12-bit ADC can report
pub const ADC_MAX: u16 = 4095;

/// Number of distinct ADC codes (full-scale span)
pub const ADC_SPAN: i32 = 4096;

/// PWM wrap value; duty is in `0..=MAX_DUTY`
pub const MAX_DUTY: u16 = 4095;

/// Display width in pixels
pub const DISPLAY_WIDTH: i32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: i32 = 64;

/// Side length of the square cursor in pixels
pub const CURSOR_SIZE: i32 = 8;

/// Maximum number of border styles in a cycle
pub const MAX_BORDER_STYLES: usize = 4;

/// How the cursor position is derived from the stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionPolicy {
    /// Stick position maps directly to a screen position (stateless)
    Absolute,
    /// Stick deflection moves the cursor a little every tick
    #[default]
    Incremental,
}

/// How stick deviation is turned into light brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DutyFormula {
    /// Half brightness at center, full span across the stick travel
    #[default]
    SignedOffset,
    /// Dark inside the dead zone, linear ramp to full at the extremes
    Magnitude,
}

/// Stick calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Raw X reading with the stick at rest
    pub center_x: u16,
    /// Raw Y reading with the stick at rest
    pub center_y: u16,
    /// Deviation at or below this magnitude counts as "no input"
    pub dead_zone: u16,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            center_x: 1929,
            center_y: 2019,
            dead_zone: 100,
        }
    }
}

/// Cursor motion configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionConfig {
    /// Mapping policy
    pub policy: PositionPolicy,
    /// Drift back to the rest position while the stick is centered
    /// (incremental policy only)
    pub spring_return: bool,
    /// Incremental step numerator
    pub gain: i32,
    /// Incremental step denominator
    pub scale: i32,
    /// Horizontal rest position (screen pixels)
    pub rest_x: i32,
    /// Vertical rest position (screen pixels)
    pub rest_y: i32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            policy: PositionPolicy::Incremental,
            spring_return: true,
            gain: 5,
            scale: 2048,
            rest_x: (DISPLAY_WIDTH - CURSOR_SIZE) / 2,
            rest_y: (DISPLAY_HEIGHT - CURSOR_SIZE) / 2,
        }
    }
}

/// Loop and debounce timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Minimum time between two accepted presses of one button
    pub debounce_ms: u32,
    /// Control loop period
    pub tick_ms: u32,
}

impl TimingConfig {
    /// Shortest allowed tick period
    pub const MIN_TICK_MS: u32 = 20;
    /// Longest allowed tick period
    pub const MAX_TICK_MS: u32 = 50;

    /// Debounce window in microseconds
    pub fn debounce_us(&self) -> u64 {
        u64::from(self.debounce_ms) * 1000
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            tick_ms: 20,
        }
    }
}

/// Ordered set of border styles the mode button cycles through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderCycle {
    styles: Vec<BorderStyle, MAX_BORDER_STYLES>,
}

impl BorderCycle {
    /// Build a cycle from a list of styles
    ///
    /// Returns `None` for an empty list or one longer than
    /// [`MAX_BORDER_STYLES`].
    pub fn new(styles: &[BorderStyle]) -> Option<Self> {
        if styles.is_empty() {
            return None;
        }
        let styles = Vec::from_slice(styles).ok()?;
        Some(Self { styles })
    }

    /// Number of styles in the cycle
    pub fn len(&self) -> u8 {
        self.styles.len() as u8
    }

    /// Never true; a cycle holds at least one style
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style at `index`, wrapping
    pub fn style(&self, index: u8) -> BorderStyle {
        self.styles[usize::from(index) % self.styles.len()]
    }

    /// Iterate over the styles in cycle order
    pub fn iter(&self) -> impl Iterator<Item = BorderStyle> + '_ {
        self.styles.iter().copied()
    }
}

impl Default for BorderCycle {
    /// Plain frame, then a thick three-line frame
    fn default() -> Self {
        let mut styles = Vec::new();
        let _ = styles.push(BorderStyle::Solid);
        let _ = styles.push(BorderStyle::TripleSolid);
        Self { styles }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BorderCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[");
        for (i, style) in self.styles.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", style);
        }
        defmt::write!(f, "]");
    }
}

/// Complete controller profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Stick calibration and dead zone
    pub calibration: CalibrationConfig,
    /// Cursor mapping
    pub position: PositionConfig,
    /// Brightness mapping
    pub duty_formula: DutyFormula,
    /// Border styles selectable with the mode button
    pub border: BorderCycle,
    /// Timing
    pub timing: TimingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rest_is_screen_center() {
        let position = PositionConfig::default();
        assert_eq!(position.rest_x, 60);
        assert_eq!(position.rest_y, 28);
    }

    #[test]
    fn test_border_cycle_wraps() {
        let cycle = BorderCycle::new(&[
            BorderStyle::Solid,
            BorderStyle::DoubleSolid,
            BorderStyle::Dashed,
        ])
        .unwrap();
        assert_eq!(cycle.len(), 3);
        assert_eq!(cycle.style(0), BorderStyle::Solid);
        assert_eq!(cycle.style(2), BorderStyle::Dashed);
        assert_eq!(cycle.style(3), BorderStyle::Solid);
    }

    #[test]
    fn test_border_cycle_limits() {
        assert!(BorderCycle::new(&[]).is_none());
        assert!(BorderCycle::new(&[BorderStyle::Solid; MAX_BORDER_STYLES + 1]).is_none());
        assert!(BorderCycle::new(&[BorderStyle::Solid; MAX_BORDER_STYLES]).is_some());
    }

    #[test]
    fn test_debounce_window_in_us() {
        assert_eq!(TimingConfig::default().debounce_us(), 200_000);
    }
}
