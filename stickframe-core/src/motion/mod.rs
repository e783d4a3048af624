//! Cursor motion

pub mod position;

pub use position::{clamp_x, clamp_y, CursorRect, PositionMapper, MAX_X, MAX_Y};
