// Core value types shared by the drawing and hit-test code.

/// What the window shows: one `0x00RRGGBB` entry per pixel, row-major.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the window is (pixels)
    pub height: usize,    // how tall the window is (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Fill the whole screen with one color.
    pub fn clear(&mut self, color: Rgb) {
        let packed = color.packed();
        for px in &mut self.pixels {
            *px = packed;
        }
    }
}

/// An RGB color; each channel is already in [0,255] by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8, // red
    pub g: u8, // green
    pub b: u8, // blue
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB for minifb.
    #[inline]
    pub fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Axis-aligned box in window coordinates (top-left origin, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,      // left edge
    pub y: i32,      // top edge
    pub width: i32,  // right edge is x + width (inclusive)
    pub height: i32, // bottom edge is y + height (inclusive)
}

/// True if `min <= value <= max`.
#[inline]
pub fn value_in_range(value: i32, min: i32, max: i32) -> bool {
    value >= min && value <= max
}

/// Inclusive on both edges: the far corner `(x+width, y+height)` still counts as inside.
pub fn point_in_rectangle(rect: &Rect, x: i32, y: i32) -> bool {
    value_in_range(x, rect.x, rect.x + rect.width) && value_in_range(y, rect.y, rect.y + rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Rect = Rect { x: 10, y: 20, width: 30, height: 40 };

    #[test]
    fn rectangle_edges_are_inside() {
        assert!(point_in_rectangle(&R, 10, 20));
        assert!(point_in_rectangle(&R, 40, 60));
        assert!(point_in_rectangle(&R, 10, 60));
        assert!(point_in_rectangle(&R, 25, 35));
    }

    #[test]
    fn points_past_the_edges_are_outside() {
        assert!(!point_in_rectangle(&R, 9, 20));
        assert!(!point_in_rectangle(&R, 10, 19));
        assert!(!point_in_rectangle(&R, 41, 60));
        assert!(!point_in_rectangle(&R, 40, 61));
        assert!(!point_in_rectangle(&R, -500, 9000));
    }

    #[test]
    fn clear_packs_color() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear(Rgb::new(0x12, 0x34, 0x56));
        assert!(fb.pixels.iter().all(|&p| p == 0x00_12_34_56));
    }
}
