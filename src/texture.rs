// Shared RGBA image handle used by frames, sprites and silhouettes.
// Cloning a Texture never copies pixels; clones point at the same buffer.

use crate::error::Error;
use image::{RgbaImage, imageops};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Texture {
    image: Rc<RgbaImage>,
}

impl Texture {
    pub fn new(image: RgbaImage) -> Self {
        Self { image: Rc::new(image) }
    }

    /// Build a texture from a raw RGBA buffer of exactly `4 * width * height` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        let len = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::new)
            .ok_or_else(|| Error::InvalidImage(format!("{len} bytes is not a {width}x{height} RGBA buffer")))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Copy out a `width x height` region starting at (x, y).
    /// Returns None if any part of the region falls outside the image.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Texture> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height());
        if !fits_x || !fits_y {
            return None;
        }
        let sub = imageops::crop_imm(self.image.as_ref(), x, y, width, height).to_image();
        Some(Texture::new(sub))
    }

    /// The alpha channel, one byte per pixel, row-major.
    pub fn alpha_channel(&self) -> Vec<u8> {
        self.image.pixels().map(|p| p[3]).collect()
    }

    /// Alpha of the pixel at (x, y), read back from a 1x1 region's RGBA bytes.
    /// Coordinates outside the image have no alpha.
    pub fn alpha_at(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        let pixel = self.region(x as u32, y as u32, 1, 1)?;
        pixel.as_rgba().as_raw().get(3).copied()
    }

    /// True if both handles share one pixel buffer.
    pub fn ptr_eq(a: &Texture, b: &Texture) -> bool {
        Rc::ptr_eq(&a.image, &b.image)
    }
}
