// Flat-color copy of a sprite that keeps the source's shape (alpha) and
// throws away its colors. Works for still images and animations alike.

use crate::animation::{Animation, AnimationEvent, Frame, Loops};
use crate::error::Error;
use crate::sprite::{Drawable, Sprite, Visual};
use crate::texture::Texture;
use crate::types::{FrameBuffer, Rgb};
use std::collections::HashMap;

pub struct Silhouette {
    sprite: Sprite,
    source: Visual,
    color: Rgb,
    // (width, height, alpha bytes) -> already recolored texture;
    // the map hashes the alpha and compares it in full on a hit
    cache: HashMap<(u32, u32, Vec<u8>), Texture>,
    builds: usize,
}

impl Silhouette {
    /// Build a silhouette of `source` in `color`, placed at (x, y).
    pub fn new(source: &Sprite, color: Rgb, x: i32, y: i32) -> Result<Self, Error> {
        let mut silhouette = Self {
            sprite: Sprite::new(source.visual.clone(), x, y).with_z(source.z),
            source: source.visual.clone(),
            color,
            cache: HashMap::new(),
            builds: 0,
        };
        silhouette.sprite.visual = silhouette.recolor_visual(&source.visual)?;
        log::debug!(
            "silhouette at ({x}, {y}): {} pixel buffer(s) built, {} cached",
            silhouette.builds,
            silhouette.cache.len()
        );
        Ok(silhouette)
    }

    fn recolor_visual(&mut self, visual: &Visual) -> Result<Visual, Error> {
        match visual {
            Visual::Static(image) => Ok(Visual::Static(self.recolor(image)?)),
            Visual::Animated(anim) => {
                let frames = anim
                    .frames()
                    .iter()
                    .map(|f| -> Result<Frame, Error> { Ok(Frame::new(self.recolor(&f.image)?, f.duration)) })
                    .collect::<Result<Vec<_>, _>>()?;
                // a terminal last frame means the source plays through once
                let loops = match anim.frames().last() {
                    Some(last) if last.duration.is_some() => anim.loops(),
                    _ => Loops::Finite(1),
                };
                Ok(Visual::Animated(Animation::new(frames, loops, anim.delay())?))
            }
        }
    }

    /// Recolor one image; images of the same size and alpha pattern share one pixel buffer.
    pub fn recolor(&mut self, image: &Texture) -> Result<Texture, Error> {
        let key = (image.width(), image.height(), image.alpha_channel());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        let Rgb { r, g, b } = self.color;
        let mut rgba = Vec::with_capacity(key.2.len() * 4);
        for &a in &key.2 {
            rgba.extend_from_slice(&[r, g, b, a]);
        }
        let texture = Texture::from_rgba(key.0, key.1, rgba)?;
        self.builds += 1;
        self.cache.insert(key, texture.clone());
        Ok(texture)
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.sprite.z = z;
        self
    }

    pub fn update(&mut self, dt: f64) {
        self.sprite.update(dt);
    }

    pub fn take_events(&mut self) -> Vec<AnimationEvent> {
        self.sprite.visual.take_events()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn source(&self) -> &Visual {
        &self.source
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// How many RGBA buffers were actually computed (cache misses).
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl Drawable for Silhouette {
    fn z(&self) -> i32 {
        self.sprite.z
    }

    fn draw(&self, fb: &mut FrameBuffer) {
        self.sprite.draw(fb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const YELLOW: Rgb = Rgb::new(255, 255, 150);

    fn colorful(seed: u8) -> Texture {
        colorful_sized(5, 3, seed)
    }

    fn colorful_sized(w: u32, h: u32, seed: u8) -> Texture {
        Texture::new(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([((x * 40 + seed as u32) % 256) as u8, (y * 70 % 256) as u8, seed, ((x * 50 + y * 7) % 256) as u8])
        }))
    }

    fn assert_is_silhouette_of(out: &Texture, src: &Texture, color: Rgb) {
        assert_eq!((out.width(), out.height()), (src.width(), src.height()));
        for (o, s) in out.as_rgba().pixels().zip(src.as_rgba().pixels()) {
            assert_eq!(o.0, [color.r, color.g, color.b, s[3]]);
        }
    }

    #[test]
    fn static_silhouette_keeps_shape_and_drops_color() {
        let src = colorful(3);
        let sprite = Sprite::new(Visual::Static(src.clone()), 1, 2);
        let s = Silhouette::new(&sprite, YELLOW, 50, 60).unwrap();
        assert_eq!((s.sprite().x, s.sprite().y), (50, 60));
        assert_is_silhouette_of(s.sprite().image(), &src, YELLOW);
        assert!(matches!(s.source(), Visual::Static(t) if Texture::ptr_eq(t, &src)));
        assert_eq!(s.color(), YELLOW);
    }

    #[test]
    fn animated_silhouette_keeps_timing_and_order() {
        let images = vec![colorful(1), colorful_sized(2, 4, 2), colorful_sized(6, 1, 3)];
        let anim = Animation::from_image_sequence(images.clone(), &[0.1, 0.2, 0.3], Loops::Finite(2), 0.5).unwrap();
        let sprite = Sprite::new(Visual::Animated(anim), 0, 0);
        let s = Silhouette::new(&sprite, Rgb::new(0, 0, 0), 0, 0).unwrap();

        let Visual::Animated(out) = &s.sprite().visual else {
            panic!("expected an animated silhouette");
        };
        assert_eq!(out.frame_count(), 3);
        assert_eq!(out.loops(), Loops::Finite(2));
        assert_eq!(out.delay(), 0.5);
        for (f, (src, d)) in out.frames().iter().zip(images.iter().zip([0.1, 0.2, 0.3])) {
            assert_eq!(f.duration, Some(d));
            assert_eq!((f.image.width(), f.image.height()), (src.width(), src.height()));
            assert_is_silhouette_of(&f.image, src, Rgb::new(0, 0, 0));
        }
    }

    #[test]
    fn identical_alpha_patterns_share_one_buffer() {
        // different colors, same alpha everywhere
        let images = vec![colorful(1), colorful(9), colorful(17)];
        let anim = Animation::from_image_sequence(images, &[0.1; 3], Loops::Infinite, 0.0).unwrap();
        let s = Silhouette::new(&Sprite::new(Visual::Animated(anim), 0, 0), YELLOW, 0, 0).unwrap();

        assert_eq!(s.builds(), 1);
        assert_eq!(s.cache_len(), 1);
        let Visual::Animated(out) = &s.sprite().visual else {
            panic!("expected an animated silhouette");
        };
        assert!(Texture::ptr_eq(&out.frames()[0].image, &out.frames()[2].image));
    }

    #[test]
    fn same_alpha_bytes_in_another_shape_gets_its_own_buffer() {
        let wide = Texture::new(RgbaImage::from_pixel(3, 2, Rgba([9, 9, 9, 255])));
        let tall = Texture::new(RgbaImage::from_pixel(2, 3, Rgba([9, 9, 9, 255])));
        assert_eq!(wide.alpha_channel(), tall.alpha_channel());

        let anim = Animation::from_image_sequence(vec![wide.clone(), tall.clone()], &[0.1; 2], Loops::Infinite, 0.0)
            .unwrap();
        let s = Silhouette::new(&Sprite::new(Visual::Animated(anim), 0, 0), YELLOW, 0, 0).unwrap();
        let Visual::Animated(out) = &s.sprite().visual else {
            panic!("expected an animated silhouette");
        };
        assert_is_silhouette_of(&out.frames()[0].image, &wide, YELLOW);
        assert_is_silhouette_of(&out.frames()[1].image, &tall, YELLOW);
        assert_eq!(s.builds(), 2);
        assert_eq!(s.cache_len(), 2);
    }

    #[test]
    fn cache_lives_across_requests() {
        let mut s = Silhouette::new(&Sprite::new(Visual::Static(colorful(0)), 0, 0), YELLOW, 0, 0).unwrap();
        let a = s.recolor(&colorful(200)).unwrap();
        assert_eq!(s.builds(), 1);

        let other_shape = Texture::new(RgbaImage::from_pixel(5, 3, Rgba([0, 0, 0, 7])));
        let b = s.recolor(&other_shape).unwrap();
        assert_eq!(s.builds(), 2);
        assert!(Texture::ptr_eq(&a, s.sprite().image()));
        assert!(!Texture::ptr_eq(&a, &b));
    }

    #[test]
    fn terminal_last_frame_plays_once() {
        let frames = vec![Frame::new(colorful(1), Some(0.1)), Frame::new(colorful(2), None)];
        let anim = Animation::new(frames, Loops::Infinite, 0.0).unwrap();
        let s = Silhouette::new(&Sprite::new(Visual::Animated(anim), 0, 0), YELLOW, 0, 0).unwrap();
        let Visual::Animated(out) = &s.sprite().visual else {
            panic!("expected an animated silhouette");
        };
        assert_eq!(out.loops(), Loops::Finite(1));
        assert_eq!(out.frames()[1].duration, None);
    }

    #[test]
    fn silhouette_animates_on_its_own_clock() {
        let anim = Animation::from_image_sequence(vec![colorful(1), colorful(2)], &[0.5, 0.5], Loops::Infinite, 0.0)
            .unwrap();
        let mut s = Silhouette::new(&Sprite::new(Visual::Animated(anim), 0, 0), YELLOW, 0, 0).unwrap();
        s.update(0.5);
        assert_eq!(s.take_events(), vec![AnimationEvent::FrameChanged { index: 1 }]);
    }
}
