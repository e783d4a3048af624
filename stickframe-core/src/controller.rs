//! Control loop orchestration
//!
//! One [`Controller::tick`] runs the whole pipeline once: snapshot the mode
//! flags, sample the stick, drive the lights, move the cursor, render and
//! flush the frame. The caller owns the cadence.

use crate::config::{BorderCycle, ControllerConfig};
use crate::input::{AxisSample, DeadZone, Sampler};
use crate::light::{DutyFrame, DutyMapper};
use crate::motion::{CursorRect, PositionMapper};
use crate::render::{render_frame, BorderStyle, FrameBuffer};
use crate::state::{ModeFlags, SharedFlags};
use crate::traits::{AxisInput, DisplayTransport, LightChannel, LightOutput};

/// Everything one tick observed and produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Tick counter (wraps)
    pub tick: u32,
    /// Flags the tick ran with
    pub flags: ModeFlags,
    pub x: AxisSample,
    pub y: AxisSample,
    pub cursor: CursorRect,
    pub border: BorderStyle,
    /// Duties before the gate
    pub computed: DutyFrame,
    /// Duties written to the outputs
    pub applied: DutyFrame,
    /// False if the display transport rejected the frame
    pub flushed: bool,
}

/// Owns all per-loop state of the pipeline
///
/// The only state shared with other contexts is the [`SharedFlags`]
/// reference, which is read exactly once per tick.
pub struct Controller<'a> {
    flags: &'a SharedFlags,
    border: BorderCycle,
    sampler: Sampler,
    position: PositionMapper,
    duty: DutyMapper,
    frame: FrameBuffer,
    ticks: u32,
}

impl<'a> Controller<'a> {
    /// Create a controller for a validated profile
    pub fn new(config: &ControllerConfig, flags: &'a SharedFlags) -> Self {
        let dead_zone = DeadZone::new(config.calibration.dead_zone);
        Self {
            flags,
            border: config.border.clone(),
            sampler: Sampler::new(&config.calibration),
            position: PositionMapper::new(&config.position, dead_zone),
            duty: DutyMapper::new(config.duty_formula, dead_zone),
            frame: FrameBuffer::new(),
            ticks: 0,
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> CursorRect {
        self.position.cursor()
    }

    /// Last rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Run the pipeline once
    pub fn tick<A, L, D>(&mut self, stick: &mut A, lights: &mut L, display: &mut D) -> TickReport
    where
        A: AxisInput,
        L: LightOutput,
        D: DisplayTransport,
    {
        let flags = self.flags.snapshot();
        let (x, y) = self.sampler.sample_axes(stick);

        let computed = self.duty.compute(&x, &y, flags);
        let applied = computed.gated(flags.pwm_enabled);
        for channel in LightChannel::ALL {
            lights.set_duty(channel, applied.channel(channel));
        }

        let cursor = self.position.update(&x, &y);
        let border = self.border.style(flags.border_index);
        render_frame(&mut self.frame, border, cursor);
        let flushed = display.flush(&self.frame).is_ok();

        let report = TickReport {
            tick: self.ticks,
            flags,
            x,
            y,
            cursor,
            border,
            computed,
            applied,
            flushed,
        };
        self.ticks = self.ticks.wrapping_add(1);
        report
    }
}
