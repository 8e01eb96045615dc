// A sprite that swaps to a hover visual while the cursor is over one of its
// non-transparent pixels.

use crate::animation::AnimationEvent;
use crate::sprite::{Drawable, Sprite};
use crate::types::{FrameBuffer, point_in_rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Inactive,
    Hover,
}

pub struct Button {
    inactive: Sprite,
    hover: Option<Sprite>,
    state: ButtonState,
    // tick the hidden visual too so both animations stay on the same frame
    sync_hover: bool,
}

impl Button {
    pub fn new(inactive: Sprite, hover: Option<Sprite>) -> Self {
        let mut button = Self { inactive, hover, state: ButtonState::Inactive, sync_hover: false };
        button.apply_visibility();
        button
    }

    pub fn with_sync_hover(mut self, sync: bool) -> Self {
        self.sync_hover = sync;
        self
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// The sprite that is showing right now.
    pub fn current(&self) -> &Sprite {
        match (self.state, &self.hover) {
            (ButtonState::Hover, Some(hover)) => hover,
            _ => &self.inactive,
        }
    }

    fn current_mut(&mut self) -> &mut Sprite {
        match (self.state, &mut self.hover) {
            (ButtonState::Hover, Some(hover)) => hover,
            _ => &mut self.inactive,
        }
    }

    pub fn update(&mut self, dt: f64) {
        if self.sync_hover {
            self.inactive.update(dt);
            if let Some(hover) = &mut self.hover {
                hover.update(dt);
            }
        } else {
            self.current_mut().update(dt);
        }
    }

    /// Re-evaluate hover from scratch for a cursor at (x, y).
    pub fn handle_mouse_motion(&mut self, x: i32, y: i32) {
        let next = if self.is_over_visible_pixel(x, y) { ButtonState::Hover } else { ButtonState::Inactive };
        self.set_state(next);
    }

    fn is_over_visible_pixel(&self, x: i32, y: i32) -> bool {
        if self.hover.is_none() || !point_in_rectangle(&self.inactive.bounds(), x, y) {
            return false;
        }
        let current = self.current();
        // the far edges are inside the box but past the last pixel: no alpha there
        current
            .image()
            .alpha_at(x - current.x, y - current.y)
            .is_some_and(|alpha| alpha != 0)
    }

    fn set_state(&mut self, state: ButtonState) {
        if state == self.state {
            return;
        }
        log::debug!("button at ({}, {}): {:?} -> {:?}", self.inactive.x, self.inactive.y, self.state, state);
        self.state = state;
        self.apply_visibility();
    }

    // exactly one of the two sprites is visible
    fn apply_visibility(&mut self) {
        let hovering = self.state == ButtonState::Hover;
        self.inactive.visible = !hovering || self.hover.is_none();
        if let Some(hover) = &mut self.hover {
            hover.visible = hovering;
        }
    }

    /// Drain animation events from both visuals.
    pub fn take_events(&mut self) -> Vec<AnimationEvent> {
        let mut events = self.inactive.visual.take_events();
        if let Some(hover) = &mut self.hover {
            events.extend(hover.visual.take_events());
        }
        events
    }
}

impl Drawable for Button {
    fn z(&self) -> i32 {
        self.current().z
    }

    fn draw(&self, fb: &mut FrameBuffer) {
        self.inactive.draw(fb);
        if let Some(hover) = &self.hover {
            hover.draw(fb);
        }
    }
}
