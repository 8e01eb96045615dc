// Window + software drawing utilities.
// 1) A window that shows the composed framebuffer.
// 2) Mouse motion events built from polled cursor positions.
// 3) Alpha-blended texture blits (SRC_ALPHA, ONE_MINUS_SRC_ALPHA).

use crate::error::Error;
use crate::texture::Texture;
use crate::types::FrameBuffer;
use minifb::{Key, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create the window; `fps` caps how often `present` returns.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Cursor position in window pixels, or None while it is outside the window.
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32))
    }
}

/// One mouse-move: new position plus the delta from the last reported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMotion {
    pub x: i32,  // cursor x in window pixels
    pub y: i32,  // cursor y in window pixels
    pub dx: i32, // moved right since the last event
    pub dy: i32, // moved down since the last event
}

/// Turns polled cursor positions into motion events.
#[derive(Default)]
pub struct MouseTracker {
    last: Option<(i32, i32)>, // last reported position, None until the cursor enters
}

impl MouseTracker {
    /// Some(motion) only when the cursor is in the window and moved since the last poll.
    pub fn poll(&mut self, pos: Option<(i32, i32)>) -> Option<MouseMotion> {
        let (x, y) = pos?;
        let (lx, ly) = self.last.unwrap_or((x, y));
        if self.last == Some((x, y)) {
            return None;
        }
        self.last = Some((x, y));
        Some(MouseMotion { x, y, dx: x - lx, dy: y - ly })
    }
}

/* ---------- Software blitting ---------- */

#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u32 {
    let a = alpha as u32;
    (src as u32 * a + dst as u32 * (255 - a) + 127) / 255
}

/// Composite `src` over `dst` (0x00RRGGBB) using the source alpha.
#[inline]
pub fn blend_over(dst: u32, src: [u8; 4]) -> u32 {
    match src[3] {
        0 => dst,
        255 => ((src[0] as u32) << 16) | ((src[1] as u32) << 8) | src[2] as u32,
        a => {
            let r = blend_channel(src[0], ((dst >> 16) & 0xFF) as u8, a);
            let g = blend_channel(src[1], ((dst >> 8) & 0xFF) as u8, a);
            let b = blend_channel(src[2], (dst & 0xFF) as u8, a);
            (r << 16) | (g << 8) | b
        }
    }
}

/// Draw a texture with its top-left corner at (x, y), clipped to the screen.
pub fn blit_texture(fb: &mut FrameBuffer, texture: &Texture, x: i32, y: i32) {
    let img = texture.as_rgba();
    let (w, h) = (fb.width as i64, fb.height as i64);
    for (tx, ty, px) in img.enumerate_pixels() {
        let sx = x as i64 + tx as i64;
        let sy = y as i64 + ty as i64;
        if sx < 0 || sy < 0 || sx >= w || sy >= h {
            continue;
        }
        let idx = sy as usize * fb.width + sx as usize;
        fb.pixels[idx] = blend_over(fb.pixels[idx], px.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn half_alpha_over_black_is_half_intensity() {
        assert_eq!(blend_over(0, [255, 255, 255, 128]), 0x00_80_80_80);
    }

    #[test]
    fn opaque_and_transparent_shortcuts() {
        assert_eq!(blend_over(0x00_11_22_33, [9, 9, 9, 0]), 0x00_11_22_33);
        assert_eq!(blend_over(0x00_11_22_33, [0xAA, 0xBB, 0xCC, 255]), 0x00_AA_BB_CC);
    }

    #[test]
    fn blit_is_clipped_to_screen() {
        let mut fb = FrameBuffer::new(3, 3);
        let tex = Texture::new(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        blit_texture(&mut fb, &tex, 2, -1);
        // only (2,0) lands on screen
        assert_eq!(fb.pixels[2], 0x00_FF_00_00);
        assert_eq!(fb.pixels.iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn tracker_reports_deltas_and_ignores_stillness() {
        let mut t = MouseTracker::default();
        assert_eq!(t.poll(Some((5, 5))), Some(MouseMotion { x: 5, y: 5, dx: 0, dy: 0 }));
        assert_eq!(t.poll(Some((5, 5))), None);
        assert_eq!(t.poll(Some((8, 3))), Some(MouseMotion { x: 8, y: 3, dx: 3, dy: -2 }));
        assert_eq!(t.poll(None), None);
    }
}
