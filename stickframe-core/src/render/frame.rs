//! Monochrome frame buffer
//!
//! 1 bit per pixel, organized as 8-pixel-tall pages the way SSD1306-class
//! controllers expect it: bit `y % 8` of byte `pages[y / 8][x]`.

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Frame width in pixels
pub const WIDTH: usize = DISPLAY_WIDTH as usize;

/// Number of 8-pixel pages
pub const PAGES: usize = DISPLAY_HEIGHT as usize / 8;

/// Frame buffer for a 128x64 monochrome display
///
/// Coordinates are signed so that callers can plot shapes that hang off
/// the edge; pixels outside the frame are silently dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit_pixels", &self.lit_pixels())
            .finish()
    }
}

impl FrameBuffer {
    /// Create an all-dark frame
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set or clear one pixel; out-of-frame coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !Self::in_bounds(x, y) {
            return;
        }
        let byte = &mut self.pages[y as usize / 8][x as usize];
        let mask = 1u8 << (y as usize % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read one pixel; out-of-frame coordinates read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.pages[y as usize / 8][x as usize] & (1 << (y as usize % 8)) != 0
    }

    /// Horizontal line of `len` pixels starting at `(x, y)`
    pub fn hline(&mut self, x: i32, y: i32, len: i32) {
        for i in 0..len.max(0) {
            self.set_pixel(x.saturating_add(i), y, true);
        }
    }

    /// Vertical line of `len` pixels starting at `(x, y)`
    pub fn vline(&mut self, x: i32, y: i32, len: i32) {
        for i in 0..len.max(0) {
            self.set_pixel(x, y.saturating_add(i), true);
        }
    }

    /// Rectangle outline with top-left corner at `(x, y)`
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.hline(x, y, width);
        self.hline(x, y + height - 1, width);
        self.vline(x, y, height);
        self.vline(x + width - 1, y, height);
    }

    /// Filled rectangle with top-left corner at `(x, y)`
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for row in 0..height.max(0) {
            self.hline(x, y.saturating_add(row), width);
        }
    }

    /// Raw page data, page 0 (top 8 rows) first
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Number of pixels that are on
    pub fn lit_pixels(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..DISPLAY_WIDTH).contains(&x) && (0..DISPLAY_HEIGHT).contains(&y)
    }
}
