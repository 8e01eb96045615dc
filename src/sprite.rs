// Drawable objects: a Visual (still image or animation) placed on screen.

use crate::animation::{Animation, AnimationEvent};
use crate::draw::blit_texture;
use crate::texture::Texture;
use crate::types::{FrameBuffer, Rect};

/// Either a still image or something that animates when ticked.
#[derive(Clone, Debug)]
pub enum Visual {
    Static(Texture),
    Animated(Animation),
}

impl Visual {
    /// Only animations react to time; a still image ignores it.
    pub fn update(&mut self, dt: f64) {
        if let Visual::Animated(a) = self {
            a.update(dt);
        }
    }

    /// The image that is showing right now.
    pub fn image(&self) -> &Texture {
        match self {
            Visual::Static(t) => t,
            Visual::Animated(a) => a.image(),
        }
    }

    pub fn blit(&self, fb: &mut FrameBuffer, x: i32, y: i32) {
        match self {
            Visual::Static(t) => blit_texture(fb, t, x, y),
            Visual::Animated(a) => a.blit(fb, x, y),
        }
    }

    pub fn take_events(&mut self) -> Vec<AnimationEvent> {
        match self {
            Visual::Static(_) => Vec::new(),
            Visual::Animated(a) => a.take_events(),
        }
    }
}

/// Anything the main loop can paint, ordered by `z` (lower first).
pub trait Drawable {
    fn z(&self) -> i32;
    fn draw(&self, fb: &mut FrameBuffer);
}

/// A visual with a position, a z-order and a visibility flag.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub visual: Visual,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub visible: bool,
}

impl Sprite {
    pub fn new(visual: Visual, x: i32, y: i32) -> Self {
        Self { visual, x, y, z: 0, visible: true }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn image(&self) -> &Texture {
        self.visual.image()
    }

    pub fn width(&self) -> i32 {
        self.image().width() as i32
    }

    pub fn height(&self) -> i32 {
        self.image().height() as i32
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width(), height: self.height() }
    }

    pub fn update(&mut self, dt: f64) {
        self.visual.update(dt);
    }
}

impl Drawable for Sprite {
    fn z(&self) -> i32 {
        self.z
    }

    /// Draw at the sprite's position; hidden sprites draw nothing.
    fn draw(&self, fb: &mut FrameBuffer) {
        if self.visible {
            self.visual.blit(fb, self.x, self.y);
        }
    }
}
