// The demo's contents: a still donut button, an animated donut button and a
// silhouette of the still donut.

use crate::animation::{Animation, AnimationEvent, Loops};
use crate::assets::{self, BLUE, PINK, PLAIN, PLAIN_HOVER};
use crate::button::Button;
use crate::config::Config;
use crate::error::Error;
use crate::silhouette::Silhouette;
use crate::sprite::{Drawable, Sprite, Visual};
use crate::types::FrameBuffer;

pub struct Scene {
    pub button: Button,
    pub animated_button: Button,
    pub silhouette: Silhouette,
}

fn donut_animation(config: &Config, folder: &str, style: assets::DonutStyle) -> Result<Animation, Error> {
    let count = config.animation_frames;
    let paths: Vec<_> = (1..=count).map(|n| config.animation_frame(folder, n)).collect();
    let images = assets::load_sequence(&paths, |i| assets::donut(style, i as f32 / count.max(1) as f32))?;
    Animation::from_image_sequence(images, &config.animation_durations(), Loops::Infinite, 0.0)
}

impl Scene {
    /// Load every image up front; any decode failure aborts startup.
    pub fn load(config: &Config) -> Result<Self, Error> {
        let (bx, by) = config.button_pos;
        let donut = assets::load_or_generate(&config.static_image("donut.png"), || assets::donut(PLAIN, 0.0))?;
        let donut_hover =
            assets::load_or_generate(&config.static_image("donut-hover.png"), || assets::donut(PLAIN_HOVER, 0.0))?;
        let donut = Sprite::new(Visual::Static(donut), bx, by);
        let donut_hover = Sprite::new(Visual::Static(donut_hover), bx, by);

        let (sx, sy) = config.silhouette_pos;
        let silhouette = Silhouette::new(&donut, config.silhouette_color, sx, sy)?.with_z(1);

        let (ax, ay) = config.animated_button_pos;
        let pink = Sprite::new(Visual::Animated(donut_animation(config, "pink-trans-donut", PINK)?), ax, ay);
        let blue = Sprite::new(Visual::Animated(donut_animation(config, "blue-trans-donut", BLUE)?), ax, ay);

        log::info!(
            "scene ready: buttons at ({bx}, {by}) and ({ax}, {ay}), silhouette at ({sx}, {sy}) using {} buffer(s)",
            silhouette.cache_len()
        );
        Ok(Self {
            button: Button::new(donut, Some(donut_hover)),
            animated_button: Button::new(pink, Some(blue)).with_sync_hover(true),
            silhouette,
        })
    }

    /// One fixed-rate tick.
    pub fn update(&mut self, dt: f64) {
        self.button.update(dt);
        self.animated_button.update(dt);
        self.silhouette.update(dt);
    }

    pub fn handle_mouse_motion(&mut self, x: i32, y: i32) {
        self.button.handle_mouse_motion(x, y);
        self.animated_button.handle_mouse_motion(x, y);
    }

    /// Paint everything, lowest z first; equal z keeps insertion order.
    pub fn draw(&self, fb: &mut FrameBuffer) {
        let mut layers: [&dyn Drawable; 3] = [&self.button, &self.animated_button, &self.silhouette];
        layers.sort_by_key(|d| d.z());
        for layer in layers {
            layer.draw(fb);
        }
    }

    /// Drain and log animation notifications queued during the last ticks.
    pub fn drain_events(&mut self) -> usize {
        let mut count = 0;
        let sources: [(&str, Vec<AnimationEvent>); 3] = [
            ("button", self.button.take_events()),
            ("animated button", self.animated_button.take_events()),
            ("silhouette", self.silhouette.take_events()),
        ];
        for (name, events) in sources {
            for event in events {
                match event {
                    AnimationEvent::FrameChanged { index } => log::trace!("{name}: frame {index}"),
                    AnimationEvent::AnimationEnded => log::info!("{name}: animation ended"),
                }
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonState;

    fn scene() -> Scene {
        let config = Config {
            resource_dir: std::env::temp_dir().join("pet-cafe-no-such-resources"),
            ..Config::default()
        };
        Scene::load(&config).unwrap()
    }

    #[test]
    fn placeholders_fill_in_for_missing_resources() {
        let s = scene();
        assert_eq!(s.button.current().width(), PLAIN.size as i32);
        match &s.animated_button.current().visual {
            Visual::Animated(a) => assert_eq!(a.frame_count(), 40),
            Visual::Static(_) => panic!("expected an animated donut"),
        }
        // a still source gives a one-buffer silhouette
        assert_eq!(s.silhouette.cache_len(), 1);
    }

    #[test]
    fn hovering_the_ring_switches_only_that_button() {
        let mut s = scene();
        let (bx, by) = Config::default().button_pos;
        let c = PLAIN.size as i32 / 2;

        s.handle_mouse_motion(bx + c + 30, by + c);
        assert_eq!(s.button.state(), ButtonState::Hover);
        assert_eq!(s.animated_button.state(), ButtonState::Inactive);

        // the hole is transparent
        s.handle_mouse_motion(bx + c, by + c);
        assert_eq!(s.button.state(), ButtonState::Inactive);
    }

    #[test]
    fn ticks_advance_the_animated_button() {
        let mut s = scene();
        for _ in 0..5 {
            s.update(1.0 / 120.0);
        }
        // 5/120 s reaches the end of the first 1/24 s frame; pink and blue both advance
        assert_eq!(s.drain_events(), 2);
        assert_eq!(s.drain_events(), 0);
    }

    #[test]
    fn draw_puts_pixels_on_screen() {
        let s = scene();
        let config = Config::default();
        let mut fb = FrameBuffer::new(config.width, config.height);
        s.draw(&mut fb);
        let (bx, by) = config.button_pos;
        let c = PLAIN.size as i32 / 2;
        let idx = (by + c) as usize * fb.width + (bx + c + 30) as usize;
        assert_ne!(fb.pixels[idx], 0);
    }
}
