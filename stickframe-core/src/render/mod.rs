//! Frame rendering
//!
//! Turns the border style and cursor position of one tick into a complete
//! frame. Rendering is a pure function of its inputs; nothing carries over
//! between frames.

pub mod border;
pub mod frame;

pub use border::{draw_border, BorderStyle};
pub use frame::FrameBuffer;

use crate::config::CURSOR_SIZE;
use crate::motion::CursorRect;

/// Compose a full frame: background, border, then the cursor on top
pub fn render_frame(frame: &mut FrameBuffer, style: BorderStyle, cursor: CursorRect) {
    frame.clear();
    draw_border(frame, style);
    frame.fill_rect(cursor.x, cursor.y, CURSOR_SIZE, CURSOR_SIZE);
}
