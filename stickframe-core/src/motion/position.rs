//! Cursor position mapping
//!
//! The stick is mounted rotated relative to the display: the horizontal
//! screen coordinate follows the stick's Y axis and the vertical screen
//! coordinate follows the negated X axis (pushing X up moves the cursor up).

use crate::config::{PositionConfig, PositionPolicy, ADC_MAX, CURSOR_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::input::{AxisSample, DeadZone};

/// Largest valid horizontal cursor coordinate
pub const MAX_X: i32 = DISPLAY_WIDTH - CURSOR_SIZE;

/// Largest valid vertical cursor coordinate
pub const MAX_Y: i32 = DISPLAY_HEIGHT - CURSOR_SIZE;

/// Top-left corner of the cursor square, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorRect {
    pub x: i32,
    pub y: i32,
}

impl CursorRect {
    /// Create a cursor, clamped onto the screen
    pub fn clamped(x: i32, y: i32) -> Self {
        Self {
            x: clamp_x(x),
            y: clamp_y(y),
        }
    }
}

/// Clamp a horizontal coordinate to `0..=MAX_X`
pub fn clamp_x(x: i32) -> i32 {
    x.clamp(0, MAX_X)
}

/// Clamp a vertical coordinate to `0..=MAX_Y`
pub fn clamp_y(y: i32) -> i32 {
    y.clamp(0, MAX_Y)
}

/// Scale a raw reading onto `0..=extent`, rounding to nearest
fn scale_raw(raw: u16, extent: i32) -> i32 {
    let raw = i32::from(raw.min(ADC_MAX));
    let max = i32::from(ADC_MAX);
    (raw * extent + max / 2) / max
}

/// One step toward `target`, never past it
fn step_toward(current: i32, target: i32) -> i32 {
    match current.cmp(&target) {
        core::cmp::Ordering::Less => current + 1,
        core::cmp::Ordering::Greater => current - 1,
        core::cmp::Ordering::Equal => current,
    }
}

/// Turns stick samples into a cursor position
///
/// Under the incremental policy the cursor persists between calls; under
/// the absolute policy every call is independent of the previous one.
#[derive(Debug, Clone)]
pub struct PositionMapper {
    config: PositionConfig,
    dead_zone: DeadZone,
    rest: CursorRect,
    cursor: CursorRect,
}

impl PositionMapper {
    /// Create a mapper with the cursor at the rest position
    pub fn new(config: &PositionConfig, dead_zone: DeadZone) -> Self {
        let rest = CursorRect::clamped(config.rest_x, config.rest_y);
        Self {
            config: *config,
            dead_zone,
            rest,
            cursor: rest,
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> CursorRect {
        self.cursor
    }

    /// Rest position the cursor returns to
    pub fn rest(&self) -> CursorRect {
        self.rest
    }

    /// Advance by one tick and return the new cursor position
    pub fn update(&mut self, x: &AxisSample, y: &AxisSample) -> CursorRect {
        self.cursor = match self.config.policy {
            PositionPolicy::Absolute => CursorRect::clamped(
                scale_raw(y.raw, MAX_X),
                scale_raw(ADC_MAX - x.raw.min(ADC_MAX), MAX_Y),
            ),
            PositionPolicy::Incremental => CursorRect::clamped(
                self.advance(self.cursor.x, y.deviation, self.rest.x),
                self.advance(self.cursor.y, -x.deviation, self.rest.y),
            ),
        };
        self.cursor
    }

    /// Move one coordinate under the incremental policy
    fn advance(&self, current: i32, deviation: i32, rest: i32) -> i32 {
        if self.dead_zone.is_active(deviation) {
            current.saturating_add(self.step(deviation))
        } else if self.config.spring_return {
            step_toward(current, rest)
        } else {
            current
        }
    }

    fn step(&self, deviation: i32) -> i32 {
        let scale = i64::from(self.config.scale.max(1));
        let step = i64::from(deviation) * i64::from(self.config.gain) / scale;
        step.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CENTER_X: u16 = 1929;
    const CENTER_Y: u16 = 2019;

    fn incremental(spring_return: bool) -> PositionMapper {
        let config = PositionConfig {
            spring_return,
            ..PositionConfig::default()
        };
        PositionMapper::new(&config, DeadZone::new(100))
    }

    fn absolute() -> PositionMapper {
        let config = PositionConfig {
            policy: PositionPolicy::Absolute,
            ..PositionConfig::default()
        };
        PositionMapper::new(&config, DeadZone::new(100))
    }

    fn samples(raw_x: u16, raw_y: u16) -> (AxisSample, AxisSample) {
        (
            AxisSample::new(raw_x, CENTER_X),
            AxisSample::new(raw_y, CENTER_Y),
        )
    }

    #[test]
    fn test_starts_at_rest() {
        let mapper = incremental(true);
        assert_eq!(mapper.cursor(), CursorRect { x: 60, y: 28 });
        assert_eq!(mapper.rest(), mapper.cursor());
    }

    #[test]
    fn test_out_of_screen_rest_is_clamped() {
        let config = PositionConfig {
            rest_x: 500,
            rest_y: -3,
            ..PositionConfig::default()
        };
        let mapper = PositionMapper::new(&config, DeadZone::new(100));
        assert_eq!(mapper.rest(), CursorRect { x: MAX_X, y: 0 });
    }

    #[test]
    fn test_axis_swap() {
        let mut mapper = incremental(false);
        // Y pushed full: horizontal moves right, vertical untouched
        let (x, y) = samples(CENTER_X, 4095);
        let cursor = mapper.update(&x, &y);
        assert_eq!(cursor, CursorRect { x: 60 + 2076 * 5 / 2048, y: 28 });

        // X pushed full: cursor moves up
        let (x, y) = samples(4095, CENTER_Y);
        let cursor = mapper.update(&x, &y);
        assert_eq!(cursor.y, 28 - 2166 * 5 / 2048);
    }

    #[test]
    fn test_dead_zone_boundary() {
        let mut mapper = incremental(false);
        let config = PositionConfig {
            gain: 2048,
            spring_return: false,
            ..PositionConfig::default()
        };
        mapper.config = config;

        let (x, y) = samples(CENTER_X, CENTER_Y + 100);
        assert_eq!(mapper.update(&x, &y).x, 60);

        let (x, y) = samples(CENTER_X, CENTER_Y + 101);
        assert_eq!(mapper.update(&x, &y), CursorRect { x: MAX_X, y: 28 });
    }

    #[test]
    fn test_small_deflection_truncates_to_zero_step() {
        let mut mapper = incremental(false);
        let (x, y) = samples(CENTER_X, CENTER_Y + 400);
        // 400 * 5 / 2048 == 0
        assert_eq!(mapper.update(&x, &y).x, 60);
        let (x, y) = samples(CENTER_X, CENTER_Y - 400);
        assert_eq!(mapper.update(&x, &y).x, 60);
    }

    #[test]
    fn test_without_spring_return_holds_still() {
        let mut mapper = incremental(false);
        let (x, y) = samples(CENTER_X, 4095);
        for _ in 0..10 {
            mapper.update(&x, &y);
        }
        let moved = mapper.cursor();
        let (x, y) = samples(CENTER_X, CENTER_Y);
        assert_eq!(mapper.update(&x, &y), moved);
    }

    #[test]
    fn test_spring_return_steps_by_one() {
        let mut mapper = incremental(true);
        let (x, y) = samples(CENTER_X, 4095);
        for _ in 0..10 {
            mapper.update(&x, &y);
        }
        let moved = mapper.cursor();
        assert_eq!(moved.x, 110);

        let (x, y) = samples(CENTER_X, CENTER_Y);
        assert_eq!(mapper.update(&x, &y).x, 109);
        assert_eq!(mapper.update(&x, &y).x, 108);
    }

    #[test]
    fn test_incremental_clamps_at_edges() {
        let mut mapper = incremental(true);
        let (x, y) = samples(0, 0);
        for _ in 0..200 {
            mapper.update(&x, &y);
        }
        // Y low drives left; X low drives down
        assert_eq!(mapper.cursor(), CursorRect { x: 0, y: MAX_Y });
    }

    #[test]
    fn test_absolute_extremes() {
        let mut mapper = absolute();
        let (x, y) = samples(4095, 0);
        assert_eq!(mapper.update(&x, &y), CursorRect { x: 0, y: 0 });
        let (x, y) = samples(0, 4095);
        assert_eq!(mapper.update(&x, &y), CursorRect { x: MAX_X, y: MAX_Y });
    }

    #[test]
    fn test_absolute_rounds_to_nearest() {
        let mut mapper = absolute();
        // 2048 * 120 / 4095 = 60.01
        let (x, y) = samples(2048, 2048);
        let cursor = mapper.update(&x, &y);
        assert_eq!(cursor.x, 60);
        // (4095 - 2048) * 56 / 4095 = 27.99
        assert_eq!(cursor.y, 28);
    }

    #[test]
    fn test_absolute_is_stateless() {
        let mut a = absolute();
        let mut b = absolute();
        let (x1, y1) = samples(100, 3000);
        let (x2, y2) = samples(3500, 700);
        a.update(&x1, &y1);
        assert_eq!(a.update(&x2, &y2), b.update(&x2, &y2));
    }

    proptest! {
        #[test]
        fn prop_clamp_is_idempotent(v in prop_oneof![Just(i32::MIN), Just(i32::MAX), any::<i32>()]) {
            let x = clamp_x(v);
            let y = clamp_y(v);
            prop_assert!((0..=MAX_X).contains(&x));
            prop_assert!((0..=MAX_Y).contains(&y));
            prop_assert_eq!(clamp_x(x), x);
            prop_assert_eq!(clamp_y(y), y);
        }

        #[test]
        fn prop_cursor_always_on_screen(
            absolute_policy in any::<bool>(),
            gain in 0i32..=i32::MAX,
            readings in proptest::collection::vec((any::<u16>(), any::<u16>()), 1..50),
        ) {
            let config = PositionConfig {
                policy: if absolute_policy { PositionPolicy::Absolute } else { PositionPolicy::Incremental },
                gain,
                ..PositionConfig::default()
            };
            let mut mapper = PositionMapper::new(&config, DeadZone::new(100));
            for (raw_x, raw_y) in readings {
                let (x, y) = samples(raw_x, raw_y);
                let cursor = mapper.update(&x, &y);
                prop_assert!((0..=MAX_X).contains(&cursor.x));
                prop_assert!((0..=MAX_Y).contains(&cursor.y));
            }
        }

        #[test]
        fn prop_spring_return_converges_monotonically(
            start_x in 0..=MAX_X,
            start_y in 0..=MAX_Y,
        ) {
            let mut mapper = incremental(true);
            mapper.cursor = CursorRect { x: start_x, y: start_y };
            let rest = mapper.rest();
            let (x, y) = samples(CENTER_X, CENTER_Y);

            let mut distance = (start_x - rest.x).abs() + (start_y - rest.y).abs();
            for _ in 0..(MAX_X + MAX_Y) {
                let cursor = mapper.update(&x, &y);
                let next = (cursor.x - rest.x).abs() + (cursor.y - rest.y).abs();
                prop_assert!(next <= distance);
                prop_assert!(next == 0 || next < distance);
                distance = next;
            }
            prop_assert_eq!(mapper.cursor(), rest);
        }
    }
}
