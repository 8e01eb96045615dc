// Startup image loading. Everything is decoded eagerly before the window opens.
// A missing file is replaced by a procedurally drawn donut so the demo still
// runs without a resource directory; a file that exists but won't decode is fatal.

use crate::error::Error;
use crate::texture::Texture;
use image::{Rgba, RgbaImage};
use std::f32::consts::TAU;
use std::path::Path;

/// Decode any format the `image` crate knows into RGBA.
pub fn load_texture(path: &Path) -> Result<Texture, Error> {
    let img = image::open(path).map_err(|e| Error::AssetLoad(format!("{}: {e}", path.display())))?;
    Ok(Texture::new(img.to_rgba8()))
}

pub fn load_or_generate(path: &Path, fallback: impl FnOnce() -> Texture) -> Result<Texture, Error> {
    if path.exists() {
        return load_texture(path);
    }
    log::warn!("{} not found, drawing a placeholder", path.display());
    Ok(fallback())
}

/// Load a numbered frame sequence, generating any frame whose file is missing.
pub fn load_sequence<P: AsRef<Path>>(paths: &[P], fallback: impl Fn(usize) -> Texture) -> Result<Vec<Texture>, Error> {
    let mut generated = 0;
    let mut frames = Vec::with_capacity(paths.len());
    for (i, p) in paths.iter().enumerate() {
        let p = p.as_ref();
        if p.exists() {
            frames.push(load_texture(p)?);
        } else {
            generated += 1;
            frames.push(fallback(i));
        }
    }
    if generated > 0 {
        let first = paths.first().map(|p| p.as_ref().display().to_string()).unwrap_or_default();
        log::warn!("{generated}/{} frames missing (first: {first}), drawing placeholders", paths.len());
    }
    Ok(frames)
}

/* ---------- Procedural donut ---------- */

#[derive(Debug, Clone, Copy)]
pub struct DonutStyle {
    pub size: u32,
    pub dough: [u8; 3],
    pub icing: [u8; 3],
    pub sprinkles: bool,
}

pub const PLAIN: DonutStyle = DonutStyle { size: 96, dough: [196, 140, 82], icing: [120, 72, 40], sprinkles: false };
pub const PLAIN_HOVER: DonutStyle = DonutStyle { size: 96, dough: [214, 160, 98], icing: [250, 170, 200], sprinkles: true };
pub const PINK: DonutStyle = DonutStyle { size: 80, dough: [200, 150, 90], icing: [245, 130, 185], sprinkles: true };
pub const BLUE: DonutStyle = DonutStyle { size: 80, dough: [200, 150, 90], icing: [110, 170, 245], sprinkles: true };

const SPRINKLE_COLORS: [[u8; 3]; 4] = [[255, 255, 255], [255, 220, 60], [90, 220, 120], [240, 80, 80]];

/// Coverage of a 1px soft edge: 1 inside, 0 outside, linear across the boundary.
#[inline]
fn edge(distance_inside: f32) -> f32 {
    (distance_inside + 0.5).clamp(0.0, 1.0)
}

/// Draw a donut; `turn` in [0,1) rotates the sprinkles so frames can animate.
pub fn donut(style: DonutStyle, turn: f32) -> Texture {
    let s = style.size as f32;
    let c = s / 2.0;
    let outer = c - 1.0;
    let hole = s * 0.18;
    let icing_outer = outer * 0.82;
    let icing_inner = hole * 1.35;
    let sprinkle_r = (icing_outer + icing_inner) / 2.0;
    let sprinkle_dot = s * 0.04;

    let img = RgbaImage::from_fn(style.size, style.size, |x, y| {
        let (dx, dy) = (x as f32 + 0.5 - c, y as f32 + 0.5 - c);
        let d = (dx * dx + dy * dy).sqrt();

        let coverage = edge(outer - d).min(edge(d - hole));
        if coverage <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }

        let mut rgb = if d < icing_outer && d > icing_inner { style.icing } else { style.dough };
        if style.sprinkles {
            for k in 0..8 {
                let a = (turn + k as f32 / 8.0) * TAU;
                let (sx, sy) = (sprinkle_r * a.cos(), sprinkle_r * a.sin());
                if (dx - sx).hypot(dy - sy) < sprinkle_dot {
                    rgb = SPRINKLE_COLORS[k % SPRINKLE_COLORS.len()];
                }
            }
        }
        Rgba([rgb[0], rgb[1], rgb[2], (coverage * 255.0).round() as u8])
    });
    Texture::new(img)
}
