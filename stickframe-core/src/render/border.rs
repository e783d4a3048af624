//! Border decorations

use super::FrameBuffer;
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Lit pixels per dash
pub const DASH_ON: i32 = 4;

/// Dark pixels between dashes
pub const DASH_OFF: i32 = 2;

/// Border drawn around the edge of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BorderStyle {
    /// One outline at the screen edge
    Solid,
    /// Two adjacent outlines
    DoubleSolid,
    /// Three adjacent outlines
    TripleSolid,
    /// 4 px on / 2 px off along all four edges
    Dashed,
}

impl BorderStyle {
    /// Profile name of the style
    pub fn name(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::DoubleSolid => "double",
            BorderStyle::TripleSolid => "triple",
            BorderStyle::Dashed => "dashed",
        }
    }

    /// Look a style up by its profile name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(BorderStyle::Solid),
            "double" => Some(BorderStyle::DoubleSolid),
            "triple" => Some(BorderStyle::TripleSolid),
            "dashed" => Some(BorderStyle::Dashed),
            _ => None,
        }
    }
}

/// Draw the border for `style` onto `frame`
pub fn draw_border(frame: &mut FrameBuffer, style: BorderStyle) {
    match style {
        BorderStyle::Solid => draw_outlines(frame, 1),
        BorderStyle::DoubleSolid => draw_outlines(frame, 2),
        BorderStyle::TripleSolid => draw_outlines(frame, 3),
        BorderStyle::Dashed => draw_dashed(frame),
    }
}

/// Concentric outlines, each inset by one more pixel
fn draw_outlines(frame: &mut FrameBuffer, count: i32) {
    for inset in 0..count {
        frame.draw_rect(
            inset,
            inset,
            DISPLAY_WIDTH - 2 * inset,
            DISPLAY_HEIGHT - 2 * inset,
        );
    }
}

fn draw_dashed(frame: &mut FrameBuffer) {
    let lit = |i: i32| i % (DASH_ON + DASH_OFF) < DASH_ON;

    for x in (0..DISPLAY_WIDTH).filter(|&x| lit(x)) {
        frame.set_pixel(x, 0, true);
        frame.set_pixel(x, DISPLAY_HEIGHT - 1, true);
    }
    for y in (0..DISPLAY_HEIGHT).filter(|&y| lit(y)) {
        frame.set_pixel(0, y, true);
        frame.set_pixel(DISPLAY_WIDTH - 1, y, true);
    }
}
